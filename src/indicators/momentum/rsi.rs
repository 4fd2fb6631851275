//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::indicators::RsiIndicator;

pub const DEFAULT_RSI_PERIOD: u32 = 14;

/// Calculate RSI at the last sample using Wilder's smoothing
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
pub fn calculate_rsi(values: &[f64], period: u32) -> Option<RsiIndicator> {
    let period_len = period as usize;
    if period_len == 0 || values.len() < period_len + 1 {
        return None;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = values
        .windows(2)
        .map(|pair| {
            let change = pair[1] - pair[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let avg_gain = math::wilder_smoothing(&gains, period_len)?;
    let avg_loss = math::wilder_smoothing(&losses, period_len)?;

    if avg_loss == 0.0 {
        return Some(RsiIndicator {
            value: 100.0,
            period: Some(period),
        });
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));

    Some(RsiIndicator {
        value: rsi,
        period: Some(period),
    })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(values: &[f64]) -> Option<RsiIndicator> {
    calculate_rsi(values, DEFAULT_RSI_PERIOD)
}
