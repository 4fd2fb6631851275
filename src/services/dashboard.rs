//! Dashboard hand-off: the latest full batch, kept in memory for display.

use crate::models::asset::AssetSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use std::sync::Arc;
use tokio::sync::RwLock;

#[async_trait::async_trait]
pub trait DashboardSink {
    /// Receive the full ordered batch of one run, alert candidates or not.
    async fn publish(&self, batch: &[AssetSnapshot]);
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub coins: Vec<AssetSnapshot>,
}

/// One bar group of the Galaxy Score / RSI chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub symbol: String,
    pub galaxy_score: Option<f64>,
    pub rsi: Option<f64>,
}

/// Shared latest-batch buffer, written by the pipeline and read by the HTTP router.
#[derive(Clone, Default)]
pub struct DashboardState {
    latest: Arc<RwLock<Option<DashboardView>>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn latest(&self) -> Option<DashboardView> {
        self.latest.read().await.clone()
    }
}

#[async_trait::async_trait]
impl DashboardSink for DashboardState {
    async fn publish(&self, batch: &[AssetSnapshot]) {
        let view = DashboardView {
            generated_at: Utc::now(),
            coins: batch.to_vec(),
        };
        *self.latest.write().await = Some(view);
    }
}

pub fn chart_points(coins: &[AssetSnapshot]) -> Vec<ChartPoint> {
    coins
        .iter()
        .map(|coin| ChartPoint {
            symbol: coin.symbol.clone(),
            galaxy_score: coin.galaxy_score,
            rsi: coin.indicators.rsi(),
        })
        .collect()
}

/// Fixed-width text table. Unknown values render as `-`.
pub fn render_table(coins: &[AssetSnapshot]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<24} {:>14} {:>8} {:>8} {:>8} {:>12}",
        "SYMBOL", "NAME", "PRICE", "GALAXY", "ALTRANK", "RSI", "MACD_DIFF"
    );
    for coin in coins {
        let _ = writeln!(
            out,
            "{:<10} {:<24} {:>14} {:>8} {:>8} {:>8} {:>12}",
            coin.symbol,
            truncate(&coin.name, 24),
            fmt_opt(coin.price, 2),
            fmt_opt(coin.galaxy_score, 1),
            coin.alt_rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
            fmt_opt(coin.indicators.rsi(), 2),
            fmt_opt(coin.indicators.macd_diff(), 4),
        );
    }
    out
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
