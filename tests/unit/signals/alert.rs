//! Unit tests for alert selection and message rendering

use lunarwatch::models::{AssetSnapshot, IndicatorResult, MarketRecord};
use lunarwatch::signals::AlertEvaluator;

fn snapshot(symbol: &str, galaxy_score: f64, rsi: Option<f64>) -> AssetSnapshot {
    let record = MarketRecord::new(symbol)
        .with_name(format!("{} Coin", symbol))
        .with_price(1.5)
        .with_galaxy_score(galaxy_score)
        .with_alt_rank(10);
    let indicators = match rsi {
        Some(rsi) => IndicatorResult::new(rsi, -0.2),
        None => IndicatorResult::absent(),
    };
    AssetSnapshot::from_record(record, indicators)
}

#[test]
fn test_galaxy_score_boundary() {
    assert!(!AlertEvaluator::is_alert(&snapshot("A", 80.0, Some(20.0))));
    assert!(AlertEvaluator::is_alert(&snapshot("B", 81.0, Some(20.0))));
    assert!(AlertEvaluator::is_alert(&snapshot("C", 80.0001, Some(20.0))));
}

#[test]
fn test_rsi_boundary() {
    assert!(!AlertEvaluator::is_alert(&snapshot("A", 90.0, Some(30.0))));
    assert!(AlertEvaluator::is_alert(&snapshot("B", 90.0, Some(29.999))));
    assert!(AlertEvaluator::is_alert(&snapshot("C", 90.0, Some(0.0))));
}

#[test]
fn test_absent_indicators_never_selected() {
    for galaxy_score in [0.0, 50.0, 80.0, 81.0, 100.0, 1e9] {
        let snap = snapshot("X", galaxy_score, None);
        assert!(!AlertEvaluator::is_alert(&snap));
        assert!(AlertEvaluator::evaluate(&[snap]).is_empty());
    }
}

#[test]
fn test_unknown_galaxy_score_never_selected() {
    let record = MarketRecord::new("NOGS").with_price(2.0);
    let snap = AssetSnapshot::from_record(record, IndicatorResult::new(5.0, 0.0));
    assert!(!AlertEvaluator::is_alert(&snap));
}

#[test]
fn test_zero_values_are_evaluated() {
    assert!(!AlertEvaluator::is_alert(&snapshot("Z", 0.0, Some(10.0))));

    let record = MarketRecord::new("FREE").with_price(0.0).with_galaxy_score(95.0);
    let snap = AssetSnapshot::from_record(record, IndicatorResult::new(10.0, 0.0));
    let alerts = AlertEvaluator::evaluate(&[snap]);
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].message.contains("Price: $0.00"));
}

#[test]
fn test_order_preserved() {
    let batch = vec![
        snapshot("FIRST", 95.0, Some(10.0)),
        snapshot("SKIP", 70.0, Some(10.0)),
        snapshot("SECOND", 85.0, Some(25.0)),
        snapshot("NODATA", 99.0, None),
        snapshot("THIRD", 81.0, Some(29.0)),
    ];
    let symbols: Vec<String> = AlertEvaluator::evaluate(&batch)
        .into_iter()
        .map(|alert| alert.symbol)
        .collect();
    assert_eq!(symbols, vec!["FIRST", "SECOND", "THIRD"]);
}

#[test]
fn test_candidate_fields() {
    let alerts = AlertEvaluator::evaluate(&[snapshot("ETH", 88.0, Some(12.5))]);
    let alert = &alerts[0];
    assert_eq!(alert.symbol, "ETH");
    assert_eq!(alert.name, "ETH Coin");
    assert_eq!(alert.price, Some(1.5));
    assert_eq!(alert.galaxy_score, 88.0);
    assert_eq!(alert.rsi, 12.5);
}

#[test]
fn test_render_message() {
    let message = AlertEvaluator::render_message("Bitcoin", "BTC", Some(43125.5), 85.0, 25.25);
    assert_eq!(
        message,
        "🚀 Bitcoin (BTC) Analysis:\n\
         Price: $43125.50\n\
         Galaxy Score: 85\n\
         RSI: 25.25 (Oversold)\n\
         Consider buying for potential upside!"
    );
}

#[test]
fn test_render_message_fractional_score_and_unknown_price() {
    let message = AlertEvaluator::render_message("Cardano", "ADA", None, 85.5, 3.0);
    assert!(message.contains("Galaxy Score: 85.5\n"));
    assert!(message.contains("Price: unknown\n"));
    assert!(message.contains("RSI: 3.00 (Oversold)"));
}

#[test]
fn test_evaluate_does_not_mutate_input() {
    let batch = vec![snapshot("BTC", 90.0, Some(10.0))];
    let before = batch.clone();
    let _ = AlertEvaluator::evaluate(&batch);
    assert_eq!(batch, before);
}
