//! LunarCrush v2 payload mapping.
//!
//! Records are read field by field so that one bad field only makes that
//! field unknown instead of rejecting the whole batch.

use crate::models::asset::MarketRecord;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// `{"data": [...]}` envelope shared by every v2 endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

impl Envelope {
    pub fn into_records(self) -> Vec<Value> {
        self.data.unwrap_or_default()
    }
}

/// Map one raw market record. `None` when the symbol is missing.
pub fn parse_market_record(raw: &Value) -> Option<MarketRecord> {
    let symbol = raw
        .get("s")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();

    let price_sparkline = match raw.get("sparkline").and_then(|s| s.get("price")) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let parsed = parse_sparkline(value);
            if parsed.is_none() {
                warn!(symbol = %symbol, "LunarCrush: malformed sparkline for {}, treating as missing", symbol);
            }
            parsed
        }
    };

    Some(MarketRecord {
        name: raw.get("n").and_then(Value::as_str).map(str::to_string),
        price: raw.get("p").and_then(as_number),
        galaxy_score: raw.get("gs").and_then(as_number),
        alt_rank: raw
            .get("acr")
            .and_then(as_number)
            .filter(|rank| *rank >= 0.0 && rank.fract() == 0.0)
            .map(|rank| rank as u32),
        price_sparkline,
        symbol,
    })
}

/// Every element must be numeric, otherwise the whole sparkline is rejected.
pub fn parse_sparkline(value: &Value) -> Option<Vec<f64>> {
    value.as_array()?.iter().map(as_number).collect()
}

/// Numbers may arrive as JSON numbers or numeric strings. `NaN` and infinities are unknown.
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}
