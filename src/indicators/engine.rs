//! Per-asset indicator computation.

use crate::indicators::momentum::{macd, rsi};
use crate::models::indicators::IndicatorResult;
use crate::models::series::PriceSeries;

/// Samples required before any indicator is reported. Matches the slow MACD
/// window and gates RSI as well.
pub const MIN_SAMPLES: usize = 26;

pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Compute RSI(14) and the MACD(12, 26, 9) difference at the latest sample.
    ///
    /// Series shorter than [`MIN_SAMPLES`], or any series whose indicators come
    /// out undefined or non-finite, yield [`IndicatorResult::absent`].
    pub fn compute(series: &PriceSeries) -> IndicatorResult {
        let values = series.values();
        if values.len() < MIN_SAMPLES || values.iter().any(|v| !v.is_finite()) {
            return IndicatorResult::absent();
        }

        let rsi = rsi::calculate_rsi_default(values);
        let macd = macd::calculate_macd_default(values);

        match (rsi, macd) {
            (Some(rsi), Some(macd)) if rsi.value.is_finite() && macd.histogram.is_finite() => {
                IndicatorResult::new(rsi.value, macd.histogram)
            }
            _ => IndicatorResult::absent(),
        }
    }
}
