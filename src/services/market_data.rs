//! Market data provider interface consumed by the pipeline.

use crate::error::IngestionError;
use crate::models::asset::MarketRecord;

#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Ranked asset list for one run, best first, at most `limit` records.
    async fn fetch_market(&self, limit: usize) -> Result<Vec<MarketRecord>, IngestionError>;

    /// Price sparkline for a single asset, oldest first.
    async fn fetch_sparkline(&self, symbol: &str) -> Result<Vec<f64>, IngestionError>;
}
