//! Shared data models spanning the engine layers.

pub mod asset;
pub mod indicators;
pub mod series;

pub use asset::{AlertCandidate, AssetSnapshot, MarketRecord};
pub use indicators::{IndicatorResult, MacdIndicator, RsiIndicator};
pub use series::PriceSeries;
