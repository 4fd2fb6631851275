//! Per-asset records flowing through one run.

use super::indicators::IndicatorResult;
use serde::{Deserialize, Serialize};

/// One ranked asset as delivered by the market data collaborator.
///
/// Everything except the symbol may be unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub symbol: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub galaxy_score: Option<f64>,
    pub alt_rank: Option<u32>,
    pub price_sparkline: Option<Vec<f64>>,
}

impl MarketRecord {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            price: None,
            galaxy_score: None,
            alt_rank: None,
            price_sparkline: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_galaxy_score(mut self, galaxy_score: f64) -> Self {
        self.galaxy_score = Some(galaxy_score);
        self
    }

    pub fn with_alt_rank(mut self, alt_rank: u32) -> Self {
        self.alt_rank = Some(alt_rank);
        self
    }

    pub fn with_sparkline(mut self, prices: Vec<f64>) -> Self {
        self.price_sparkline = Some(prices);
        self
    }
}

/// Market attributes of one asset joined with its computed indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetSnapshot {
    pub symbol: String,
    pub name: String,
    pub price: Option<f64>,
    pub galaxy_score: Option<f64>,
    pub alt_rank: Option<u32>,
    #[serde(flatten)]
    pub indicators: IndicatorResult,
}

impl AssetSnapshot {
    /// Join an ingestion record with its indicators. An unknown name falls
    /// back to the symbol.
    pub fn from_record(record: MarketRecord, indicators: IndicatorResult) -> Self {
        let name = record
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| record.symbol.clone());
        Self {
            symbol: record.symbol,
            name,
            price: record.price,
            galaxy_score: record.galaxy_score,
            alt_rank: record.alt_rank,
            indicators,
        }
    }
}

/// A snapshot selected for notification, with its rendered message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertCandidate {
    pub symbol: String,
    pub name: String,
    pub price: Option<f64>,
    pub galaxy_score: f64,
    pub rsi: f64,
    pub message: String,
}
