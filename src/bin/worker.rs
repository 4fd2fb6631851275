//! Lunarwatch Worker
//!
//! Runs the screening pipeline once, or on a cron cadence when
//! `EVAL_INTERVAL_SECONDS` is set, and serves the dashboard over HTTP.

use dotenvy::dotenv;
use lunarwatch::config::{self, Config};
use lunarwatch::core::http::{start_server, AppState};
use lunarwatch::core::pipeline::{Pipeline, PipelineConfig};
use lunarwatch::core::scheduler::RunScheduler;
use lunarwatch::logging;
use lunarwatch::metrics::Metrics;
use lunarwatch::services::dashboard::{render_table, DashboardState};
use lunarwatch::services::lunarcrush::{LunarCrushClient, LunarCrushProvider};
use lunarwatch::services::market_data::MarketDataProvider;
use lunarwatch::services::notifier::{LogNotifier, Notifier, TelegramNotifier};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let env = config::get_environment();
    logging::init_logging(&env);

    let config = Config::from_env()?;
    info!("Starting Lunarwatch Worker");
    info!(environment = %env, "Environment");
    info!(
        asset_limit = config.asset_limit,
        workers = config.worker_count,
        interval = config.eval_interval_seconds,
        "Configuration loaded"
    );

    let metrics = Arc::new(Metrics::new()?);
    let dashboard = DashboardState::new();

    let provider: Arc<dyn MarketDataProvider + Send + Sync> = Arc::new(LunarCrushProvider::new(
        LunarCrushClient::new(&config.lunarcrush),
    ));

    let (notifier, destination): (Arc<dyn Notifier + Send + Sync>, String) = match config.telegram {
        Some(ref telegram) => {
            info!("Notifications: Telegram");
            (Arc::new(TelegramNotifier::new(telegram)), telegram.chat_id.clone())
        }
        None => {
            warn!("TELEGRAM_TOKEN/TELEGRAM_CHAT_ID not set, alerts will only be logged");
            (Arc::new(LogNotifier), "log".to_string())
        }
    };

    let pipeline = Arc::new(
        Pipeline::new(
            PipelineConfig {
                asset_limit: config.asset_limit,
                worker_count: config.worker_count,
                fetch_concurrency: config.fetch_concurrency,
                destination,
            },
            provider,
            notifier,
            Arc::new(dashboard.clone()),
        )
        .with_metrics(metrics.clone()),
    );

    if config.eval_interval_seconds == 0 {
        info!("Single run (EVAL_INTERVAL_SECONDS is 0)");
        let report = pipeline.run().await?;
        info!(
            assets = report.snapshots.len(),
            alerts = report.alerts.len(),
            notifications_sent = report.notifications_sent,
            notifications_failed = report.notifications_failed,
            "Run complete"
        );
        println!("{}", render_table(&report.snapshots));
        return Ok(());
    }

    let state = AppState::new(dashboard, metrics);
    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, state).await {
            error!(error = %e, "HTTP server error");
        }
    });

    let scheduler = RunScheduler::new(pipeline.clone(), config.eval_interval_seconds)?;
    scheduler.start().await;

    // Graceful shutdown
    info!("Worker started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down worker...");
            scheduler.stop().await;
            info!("Worker stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
            scheduler.stop().await;
        }
    }

    Ok(())
}
