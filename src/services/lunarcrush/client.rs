//! LunarCrush v2 REST client

use super::messages::Envelope;
use crate::config::LunarCrushConfig;
use crate::error::IngestionError;
use backon::{ExponentialBuilder, Retryable};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub struct LunarCrushClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_retries: usize,
    min_retry_delay: Duration,
}

impl LunarCrushClient {
    pub fn new(config: &LunarCrushConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: &LunarCrushConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            max_retries: config.max_retries,
            min_retry_delay: Duration::from_millis(500),
        }
    }

    /// Shorten the first backoff step (tests).
    pub fn with_min_retry_delay(mut self, delay: Duration) -> Self {
        self.min_retry_delay = delay;
        self
    }

    /// Top assets sorted by Galaxy Score.
    pub async fn market(&self, limit: usize) -> Result<Vec<Value>, IngestionError> {
        let limit = limit.to_string();
        self.get(&[("data", "market"), ("sort", "galaxy_score"), ("limit", &limit)])
            .await
    }

    /// Detail records for one symbol.
    pub async fn assets(&self, symbol: &str) -> Result<Vec<Value>, IngestionError> {
        self.get(&[("data", "assets"), ("symbol", symbol)]).await
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<Vec<Value>, IngestionError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.min_retry_delay)
            .with_max_times(self.max_retries);

        (|| async { self.get_once(params).await })
            .retry(backoff)
            .when(IngestionError::is_retryable)
            .notify(|e: &IngestionError, delay: Duration| {
                warn!(
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "LunarCrush: request failed, retrying in {:?}",
                    delay
                );
            })
            .await
    }

    async fn get_once(&self, params: &[(&str, &str)]) -> Result<Vec<Value>, IngestionError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestionError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let envelope: Envelope = serde_json::from_slice(&body)?;
        let records = envelope.into_records();
        debug!(count = records.len(), "LunarCrush: received {} records", records.len());
        Ok(records)
    }
}
