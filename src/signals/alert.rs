//! Alert selection over a batch of asset snapshots.

use crate::models::asset::{AlertCandidate, AssetSnapshot};

/// Galaxy Score must be strictly above this.
pub const GALAXY_SCORE_THRESHOLD: f64 = 80.0;
/// RSI must be strictly below this.
pub const RSI_OVERSOLD_THRESHOLD: f64 = 30.0;

pub struct AlertEvaluator;

impl AlertEvaluator {
    /// Strong sentiment and an oversold price.
    ///
    /// Absent indicators or an unknown Galaxy Score never match. Zero is an
    /// ordinary value.
    pub fn is_alert(snapshot: &AssetSnapshot) -> bool {
        match (snapshot.indicators.rsi(), snapshot.galaxy_score) {
            (Some(rsi), Some(galaxy_score)) => {
                galaxy_score > GALAXY_SCORE_THRESHOLD && rsi < RSI_OVERSOLD_THRESHOLD
            }
            _ => false,
        }
    }

    /// Select alert candidates, keeping the input order.
    pub fn evaluate(snapshots: &[AssetSnapshot]) -> Vec<AlertCandidate> {
        snapshots
            .iter()
            .filter_map(|snapshot| {
                let rsi = snapshot.indicators.rsi()?;
                let galaxy_score = snapshot.galaxy_score?;
                if !Self::is_alert(snapshot) {
                    return None;
                }
                Some(AlertCandidate {
                    symbol: snapshot.symbol.clone(),
                    name: snapshot.name.clone(),
                    price: snapshot.price,
                    galaxy_score,
                    rsi,
                    message: Self::render_message(
                        &snapshot.name,
                        &snapshot.symbol,
                        snapshot.price,
                        galaxy_score,
                        rsi,
                    ),
                })
            })
            .collect()
    }

    pub fn render_message(
        name: &str,
        symbol: &str,
        price: Option<f64>,
        galaxy_score: f64,
        rsi: f64,
    ) -> String {
        let price = match price {
            Some(price) => format!("${:.2}", price),
            None => "unknown".to_string(),
        };
        format!(
            "🚀 {name} ({symbol}) Analysis:\n\
             Price: {price}\n\
             Galaxy Score: {galaxy_score}\n\
             RSI: {rsi:.2} (Oversold)\n\
             Consider buying for potential upside!"
        )
    }
}
