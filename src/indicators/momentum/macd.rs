//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::indicators::MacdIndicator;

pub const DEFAULT_FAST_PERIOD: u32 = 12;
pub const DEFAULT_SLOW_PERIOD: u32 = 26;
pub const DEFAULT_SIGNAL_PERIOD: u32 = 9;

/// Calculate MACD at the last sample
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Both price EMAs are seeded with the SMA of their first `period` values. The
/// signal EMA is seeded the same way, except that when fewer than
/// `signal_period` MACD values exist the seed covers all of them.
pub fn calculate_macd(
    values: &[f64],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Option<MacdIndicator> {
    let (fast, slow, signal) = (fast_period as usize, slow_period as usize, signal_period as usize);
    if fast == 0 || signal == 0 || fast >= slow || values.len() < slow {
        return None;
    }

    let fast_ema = math::ema_series(values, fast);
    let slow_ema = math::ema_series(values, slow);

    // fast_ema[k] sits at index k + fast - 1, slow_ema[k] at k + slow - 1
    let offset = slow - fast;
    let macd_line: Vec<f64> = slow_ema
        .iter()
        .zip(&fast_ema[offset..])
        .map(|(slow_value, fast_value)| fast_value - slow_value)
        .collect();

    let seed_len = signal.min(macd_line.len());
    let signal_line = math::ema_series_seeded(&macd_line, signal, seed_len);

    let macd = *macd_line.last()?;
    let signal_value = *signal_line.last()?;

    Some(MacdIndicator {
        macd,
        signal: signal_value,
        histogram: macd - signal_value,
        period: Some((fast_period, slow_period, signal_period)),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(values: &[f64]) -> Option<MacdIndicator> {
    calculate_macd(
        values,
        DEFAULT_FAST_PERIOD,
        DEFAULT_SLOW_PERIOD,
        DEFAULT_SIGNAL_PERIOD,
    )
}
