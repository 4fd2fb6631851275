//! Prometheus metrics for pipeline runs.

use prometheus::{Encoder, Gauge, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub runs_total: IntCounter,
    pub run_failures_total: IntCounter,
    pub assets_analyzed_total: IntCounter,
    pub assets_insufficient_data_total: IntCounter,
    pub alerts_total: IntCounter,
    pub notifications_sent_total: IntCounter,
    pub notifications_failed_total: IntCounter,
    pub run_duration_seconds: Histogram,
    pub last_run_assets: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let runs_total = IntCounter::new("runs_total", "Completed pipeline runs")?;
        let run_failures_total = IntCounter::new("run_failures_total", "Pipeline runs aborted by a fatal error")?;
        let assets_analyzed_total = IntCounter::new("assets_analyzed_total", "Assets passed through the indicator engine")?;
        let assets_insufficient_data_total = IntCounter::new(
            "assets_insufficient_data_total",
            "Assets with too little price history for indicators",
        )?;
        let alerts_total = IntCounter::new("alerts_total", "Alert candidates selected")?;
        let notifications_sent_total = IntCounter::new("notifications_sent_total", "Alert messages delivered")?;
        let notifications_failed_total = IntCounter::new("notifications_failed_total", "Alert messages that failed to send")?;
        let run_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("run_duration_seconds", "Wall time of one pipeline run")
                .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        )?;
        let last_run_assets = Gauge::new("last_run_assets", "Assets in the most recent successful run")?;

        registry.register(Box::new(runs_total.clone()))?;
        registry.register(Box::new(run_failures_total.clone()))?;
        registry.register(Box::new(assets_analyzed_total.clone()))?;
        registry.register(Box::new(assets_insufficient_data_total.clone()))?;
        registry.register(Box::new(alerts_total.clone()))?;
        registry.register(Box::new(notifications_sent_total.clone()))?;
        registry.register(Box::new(notifications_failed_total.clone()))?;
        registry.register(Box::new(run_duration_seconds.clone()))?;
        registry.register(Box::new(last_run_assets.clone()))?;

        Ok(Self {
            registry,
            runs_total,
            run_failures_total,
            assets_analyzed_total,
            assets_insufficient_data_total,
            alerts_total,
            notifications_sent_total,
            notifications_failed_total,
            run_duration_seconds,
            last_run_assets,
        })
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
