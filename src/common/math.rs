//! Moving-average primitives used by the momentum indicators.

/// Simple moving average of the whole slice.
pub fn sma(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard EMA smoothing factor `2 / (period + 1)`.
pub fn ema_alpha(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// One step of the EMA recurrence.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let alpha = ema_alpha(period);
    value * alpha + previous * (1.0 - alpha)
}

/// EMA series seeded with the SMA of the first `period` values.
///
/// Element `k` of the result is the EMA at input index `k + period - 1`.
/// Empty when `period` is 0 or longer than the input.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    ema_series_seeded(values, period, period)
}

/// EMA series with smoothing factor from `period` but seeded with the SMA of
/// the first `seed_len` values.
///
/// Element `k` of the result is the EMA at input index `k + seed_len - 1`.
pub fn ema_series_seeded(values: &[f64], period: usize, seed_len: usize) -> Vec<f64> {
    if period == 0 || seed_len == 0 || values.len() < seed_len {
        return Vec::new();
    }

    let Some(seed) = sma(&values[..seed_len]) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(values.len() - seed_len + 1);
    out.push(seed);
    let mut prev = seed;
    for &value in &values[seed_len..] {
        prev = ema_from_previous(value, prev, period);
        out.push(prev);
    }
    out
}

/// Wilder's smoothing (RMA): seeded with the SMA of the first `period` values,
/// then `avg = (avg * (period - 1) + x) / period`. Returns the trailing value.
pub fn wilder_smoothing(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let mut avg = sma(&values[..period])?;
    let n = period as f64;
    for &value in &values[period..] {
        avg = (avg * (n - 1.0) + value) / n;
    }
    Some(avg)
}
