//! Dashboard HTTP endpoints

use axum_test::TestServer;
use lunarwatch::core::http::{create_router, AppState};
use lunarwatch::metrics::Metrics;
use lunarwatch::models::{AssetSnapshot, IndicatorResult, MarketRecord};
use lunarwatch::services::dashboard::{DashboardSink, DashboardState};
use serde_json::Value;
use std::sync::Arc;

struct TestApp {
    server: TestServer,
    dashboard: DashboardState,
}

impl TestApp {
    fn new() -> Self {
        let dashboard = DashboardState::new();
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let router = create_router(AppState::new(dashboard.clone(), metrics));
        let server = TestServer::new(router).expect("start test server");
        Self { server, dashboard }
    }
}

fn batch() -> Vec<AssetSnapshot> {
    vec![
        AssetSnapshot::from_record(
            MarketRecord::new("SOL")
                .with_name("Solana")
                .with_price(98.4)
                .with_galaxy_score(91.0)
                .with_alt_rank(2),
            IndicatorResult::new(22.5, -0.75),
        ),
        AssetSnapshot::from_record(
            MarketRecord::new("PEPE").with_galaxy_score(60.0),
            IndicatorResult::absent(),
        ),
    ]
}

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApp::new();
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert!(body["last_run"].is_null());
    assert_eq!(body["service"], "lunarwatch");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApp::new();
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("runs_total"));
}

#[tokio::test]
async fn coins_not_found_before_first_run() {
    let app = TestApp::new();
    let response = app.server.get("/api/coins").expect_failure().await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn coins_lists_every_asset() {
    let app = TestApp::new();
    app.dashboard.publish(&batch()).await;

    let response = app.server.get("/api/coins").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let coins = body["coins"].as_array().unwrap();
    assert_eq!(coins.len(), 2);
    assert_eq!(coins[0]["symbol"], "SOL");
    assert_eq!(coins[0]["rsi"], 22.5);
    assert_eq!(coins[0]["macd_diff"], -0.75);
    assert_eq!(coins[1]["symbol"], "PEPE");
    assert_eq!(coins[1]["name"], "PEPE");
    assert!(coins[1]["rsi"].is_null());
    assert!(coins[1]["price"].is_null());
    assert!(body["generated_at"].is_string());
}

#[tokio::test]
async fn chart_series_per_symbol() {
    let app = TestApp::new();
    app.dashboard.publish(&batch()).await;

    let body: Value = app.server.get("/api/chart").await.json();
    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["galaxy_score"], 91.0);
    assert_eq!(points[0]["rsi"], 22.5);
    assert!(points[1]["rsi"].is_null());
}

#[tokio::test]
async fn text_table_at_root() {
    let app = TestApp::new();
    app.dashboard.publish(&batch()).await;

    let response = app.server.get("/").await;
    assert_eq!(response.status_code(), 200);
    let text = response.text();
    assert!(text.contains("Top Coins by Galaxy Score"));
    assert!(text.contains("Solana"));
    assert!(text.contains("PEPE"));
}
