//! One screening run: ingest → indicators → alerts → notification and dashboard.

use crate::error::PipelineError;
use crate::indicators::IndicatorEngine;
use crate::metrics::Metrics;
use crate::models::asset::{AlertCandidate, AssetSnapshot, MarketRecord};
use crate::models::indicators::IndicatorResult;
use crate::models::series::PriceSeries;
use crate::services::dashboard::DashboardSink;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::Notifier;
use crate::signals::AlertEvaluator;
use futures_util::future::try_join_all;
use futures_util::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Ranked assets requested per run.
    pub asset_limit: usize,
    /// Blocking tasks used for indicator computation.
    pub worker_count: usize,
    /// Fallback sparkline requests in flight at once.
    pub fetch_concurrency: usize,
    /// Where alert messages go (e.g. a Telegram chat id).
    pub destination: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            asset_limit: 100,
            worker_count: 4,
            fetch_concurrency: 4,
            destination: "log".to_string(),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub snapshots: Vec<AssetSnapshot>,
    pub alerts: Vec<AlertCandidate>,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

pub struct Pipeline {
    config: PipelineConfig,
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    notifier: Arc<dyn Notifier + Send + Sync>,
    dashboard: Arc<dyn DashboardSink + Send + Sync>,
    metrics: Option<Arc<Metrics>>,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        provider: Arc<dyn MarketDataProvider + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
        dashboard: Arc<dyn DashboardSink + Send + Sync>,
    ) -> Self {
        Self {
            config,
            provider,
            notifier,
            dashboard,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Execute one run. Sinks only see the batch once every asset has been computed.
    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        let start = Instant::now();
        let result = self.run_inner().await;

        if let Some(ref metrics) = self.metrics {
            metrics
                .run_duration_seconds
                .observe(start.elapsed().as_secs_f64());
            match result {
                Ok(ref report) => {
                    metrics.runs_total.inc();
                    metrics.last_run_assets.set(report.snapshots.len() as f64);
                }
                Err(_) => metrics.run_failures_total.inc(),
            }
        }

        if let Err(ref e) = result {
            error!(error = %e, "Pipeline: run aborted");
        }
        result
    }

    async fn run_inner(&self) -> Result<RunReport, PipelineError> {
        info!(limit = self.config.asset_limit, "Pipeline: fetching market data");
        let records = self
            .provider
            .fetch_market(self.config.asset_limit)
            .await
            .map_err(PipelineError::IngestionUnavailable)?;

        if records.is_empty() {
            return Err(PipelineError::NoAssets);
        }

        let records = dedup_symbols(records);
        let series = self.collect_series(&records).await;

        let indicators = compute_indicators(series, self.config.worker_count).await?;
        let insufficient = indicators.iter().filter(|r| !r.is_available()).count();

        let snapshots: Vec<AssetSnapshot> = records
            .into_iter()
            .zip(indicators)
            .map(|(record, indicators)| AssetSnapshot::from_record(record, indicators))
            .collect();

        info!(
            assets = snapshots.len(),
            insufficient_data = insufficient,
            "Pipeline: computed indicators for {} assets ({} without enough history)",
            snapshots.len(),
            insufficient
        );

        let alerts = AlertEvaluator::evaluate(&snapshots);
        info!(alerts = alerts.len(), "Pipeline: {} alert candidates", alerts.len());

        let (notifications_sent, notifications_failed) = self.notify(&alerts).await;

        self.dashboard.publish(&snapshots).await;

        if let Some(ref metrics) = self.metrics {
            metrics.assets_analyzed_total.inc_by(snapshots.len() as u64);
            metrics.assets_insufficient_data_total.inc_by(insufficient as u64);
            metrics.alerts_total.inc_by(alerts.len() as u64);
            metrics.notifications_sent_total.inc_by(notifications_sent as u64);
            metrics.notifications_failed_total.inc_by(notifications_failed as u64);
        }

        Ok(RunReport {
            snapshots,
            alerts,
            notifications_sent,
            notifications_failed,
        })
    }

    /// Price series per record, fetching missing sparklines individually with
    /// at most `fetch_concurrency` requests in flight. Output keeps record order.
    /// A failed fetch leaves that asset with an empty series.
    async fn collect_series(&self, records: &[MarketRecord]) -> Vec<PriceSeries> {
        let fetches: Vec<_> = records.iter().map(|record| async move {
            if let Some(ref prices) = record.price_sparkline {
                return PriceSeries::new(prices.clone());
            }

            match self.provider.fetch_sparkline(&record.symbol).await {
                Ok(prices) => {
                    debug!(
                        symbol = %record.symbol,
                        samples = prices.len(),
                        "Pipeline: fetched sparkline for {}",
                        record.symbol
                    );
                    PriceSeries::new(prices)
                }
                Err(e) => {
                    warn!(
                        symbol = %record.symbol,
                        error = %e,
                        "Pipeline: sparkline unavailable for {}, continuing without indicators",
                        record.symbol
                    );
                    PriceSeries::empty()
                }
            }
        }).collect();

        stream::iter(fetches)
            .buffered(self.config.fetch_concurrency.max(1))
            .collect()
            .await
    }

    /// Send each alert in order; failures do not stop later sends.
    async fn notify(&self, alerts: &[AlertCandidate]) -> (usize, usize) {
        let mut sent = 0;
        let mut failed = 0;

        for alert in alerts {
            match self
                .notifier
                .send(&self.config.destination, &alert.message)
                .await
            {
                Ok(()) => {
                    sent += 1;
                    info!(
                        symbol = %alert.symbol,
                        galaxy_score = alert.galaxy_score,
                        rsi = alert.rsi,
                        "Pipeline: alert sent for {}",
                        alert.symbol
                    );
                }
                Err(e) => {
                    failed += 1;
                    error!(
                        symbol = %alert.symbol,
                        error = %e,
                        "Pipeline: failed to send alert for {}",
                        alert.symbol
                    );
                }
            }
        }

        (sent, failed)
    }
}

/// Run the indicator engine over every series on up to `workers` blocking
/// tasks. Output order matches input order.
pub async fn compute_indicators(
    series: Vec<PriceSeries>,
    workers: usize,
) -> Result<Vec<IndicatorResult>, PipelineError> {
    if series.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = series.len().div_ceil(workers.max(1));
    let mut remaining = series.into_iter();
    let mut handles = Vec::new();
    loop {
        let chunk: Vec<PriceSeries> = remaining.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        handles.push(tokio::task::spawn_blocking(move || {
            chunk.iter().map(IndicatorEngine::compute).collect::<Vec<_>>()
        }));
    }

    let chunks = try_join_all(handles).await?;
    Ok(chunks.into_iter().flatten().collect())
}

/// Keep the first record of each symbol.
fn dedup_symbols(records: Vec<MarketRecord>) -> Vec<MarketRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(record.symbol.clone());
            if !fresh {
                warn!(symbol = %record.symbol, "Pipeline: dropping duplicate record for {}", record.symbol);
            }
            fresh
        })
        .collect()
}
