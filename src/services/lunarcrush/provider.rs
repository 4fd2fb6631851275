//! LunarCrush market data provider implementation

use super::client::LunarCrushClient;
use super::messages::{parse_market_record, parse_sparkline};
use crate::error::IngestionError;
use crate::models::asset::MarketRecord;
use crate::services::market_data::MarketDataProvider;
use serde_json::Value;
use tracing::{debug, warn};

pub struct LunarCrushProvider {
    client: LunarCrushClient,
}

impl LunarCrushProvider {
    pub fn new(client: LunarCrushClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for LunarCrushProvider {
    async fn fetch_market(&self, limit: usize) -> Result<Vec<MarketRecord>, IngestionError> {
        let raw = self.client.market(limit).await?;
        let total = raw.len();

        let records: Vec<MarketRecord> = raw
            .iter()
            .filter_map(|value| {
                let record = parse_market_record(value);
                if record.is_none() {
                    warn!("LunarCrush: skipping market record without a symbol");
                }
                record
            })
            .take(limit)
            .collect();

        debug!(
            received = total,
            usable = records.len(),
            "LunarCrush: {} of {} market records usable",
            records.len(),
            total
        );
        Ok(records)
    }

    async fn fetch_sparkline(&self, symbol: &str) -> Result<Vec<f64>, IngestionError> {
        let raw = self.client.assets(symbol).await?;

        let sparkline = raw
            .iter()
            .find(|record| {
                record
                    .get("s")
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.eq_ignore_ascii_case(symbol))
            })
            .and_then(|record| record.get("sparkline"))
            .and_then(|sparkline| sparkline.get("price"))
            .and_then(parse_sparkline)
            .unwrap_or_default();

        Ok(sparkline)
    }
}
