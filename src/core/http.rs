//! HTTP endpoint server using Axum

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::metrics::Metrics;
use crate::services::dashboard::{chart_points, render_table, ChartPoint, DashboardState, DashboardView};

#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardState,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(dashboard: DashboardState, metrics: Arc<Metrics>) -> Self {
        Self {
            dashboard,
            metrics,
            start_time: Arc::new(Instant::now()),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let last_run = state.dashboard.latest().await.map(|view| view.generated_at);
    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "last_run": last_run,
        "service": "lunarwatch"
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Full table of the latest run.
pub async fn coins_handler(State(state): State<AppState>) -> Result<Json<DashboardView>, StatusCode> {
    state
        .dashboard
        .latest()
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Galaxy Score and RSI per symbol.
pub async fn chart_handler(State(state): State<AppState>) -> Result<Json<Vec<ChartPoint>>, StatusCode> {
    let view = state.dashboard.latest().await.ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(chart_points(&view.coins)))
}

/// Plain-text rendering of the latest run.
pub async fn table_handler(State(state): State<AppState>) -> (StatusCode, String) {
    match state.dashboard.latest().await {
        Some(view) => (
            StatusCode::OK,
            format!(
                "LunarCrush Cryptocurrency Analysis\nTop Coins by Galaxy Score and Technical Indicators ({})\n\n{}",
                view.generated_at.to_rfc3339(),
                render_table(&view.coins)
            ),
        ),
        None => (StatusCode::NOT_FOUND, "no completed run yet\n".to_string()),
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(table_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/coins", get(coins_handler))
        .route("/api/chart", get(chart_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> Result<(), std::io::Error> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port = port, "Dashboard listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app).await
}
