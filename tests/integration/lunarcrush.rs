//! Market data ingestion against a mocked LunarCrush API

use crate::test_utils::{coin, falling, mock_market, provider, rising, API_KEY};
use lunarwatch::error::IngestionError;
use lunarwatch::services::market_data::MarketDataProvider;
use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn market_records_keep_ranking_order() {
    let server = MockServer::start().await;
    mock_market(
        &server,
        vec![
            coin("BTC", "Bitcoin", 43000.0, 88.0, Some(rising())),
            json!({ "n": "No Symbol", "gs": 99 }),
            coin("ETH", "Ethereum", 2300.5, 75.0, None),
        ],
    )
    .await;

    let records = provider(&server, 0).fetch_market(100).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].symbol, "BTC");
    assert_eq!(records[0].galaxy_score, Some(88.0));
    assert_eq!(records[0].alt_rank, Some(12));
    assert_eq!(records[0].price_sparkline.as_ref().map(Vec::len), Some(30));
    assert_eq!(records[1].symbol, "ETH");
    assert!(records[1].price_sparkline.is_none());
}

#[tokio::test]
async fn market_request_carries_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("data", "market"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let records = provider(&server, 0).fetch_market(25).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn server_errors_are_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = provider(&server, 2).fetch_market(100).await.unwrap_err();
    assert!(matches!(err, IngestionError::Status { status: 503 }));

    let requests = server.received_requests().await.expect("wiremock requests");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = provider(&server, 3).fetch_market(100).await.unwrap_err();
    assert!(matches!(err, IngestionError::Status { status: 401 }));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_payload_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = provider(&server, 3).fetch_market(100).await.unwrap_err();
    assert!(matches!(err, IngestionError::Payload(_)));
}

#[tokio::test]
async fn sparkline_fetched_from_assets_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("key", API_KEY))
        .and(query_param("data", "assets"))
        .and(query_param("symbol", "DOGE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [coin("DOGE", "Dogecoin", 0.08, 91.0, Some(falling()))]
        })))
        .mount(&server)
        .await;

    let sparkline = provider(&server, 0).fetch_sparkline("DOGE").await.unwrap();
    assert_eq!(sparkline, falling());
}

#[tokio::test]
async fn sparkline_missing_from_assets_endpoint_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("data", "assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let sparkline = provider(&server, 0).fetch_sparkline("DOGE").await.unwrap();
    assert!(sparkline.is_empty());
}
