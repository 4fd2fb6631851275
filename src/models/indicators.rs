use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<(u32, u32, u32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}

/// Indicator values attached to an asset snapshot.
///
/// Either both values are present or both are absent: an asset has enough
/// history to analyze or it does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IndicatorResult {
    rsi: Option<f64>,
    macd_diff: Option<f64>,
}

impl IndicatorResult {
    pub fn new(rsi: f64, macd_diff: f64) -> Self {
        Self {
            rsi: Some(rsi),
            macd_diff: Some(macd_diff),
        }
    }

    /// Not enough data to compute indicators.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn rsi(&self) -> Option<f64> {
        self.rsi
    }

    /// MACD line minus signal line at the latest sample.
    pub fn macd_diff(&self) -> Option<f64> {
        self.macd_diff
    }

    pub fn is_available(&self) -> bool {
        self.rsi.is_some()
    }
}
