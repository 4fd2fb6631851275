//! Cron-based scheduler for repeated pipeline runs

use crate::core::pipeline::Pipeline;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("scheduler disabled: interval_seconds is 0")]
    Disabled,

    #[error("interval of {0}s cannot be scheduled at an even cadence")]
    UnsupportedInterval(u64),

    #[error("invalid cron expression '{expr}': {source}")]
    InvalidCron {
        expr: String,
        #[source]
        source: cron::error::Error,
    },
}

/// Cron expression (second minute hour day month weekday) firing every
/// `interval_seconds`.
///
/// Cron steps restart at each minute, hour or day boundary, so only intervals
/// dividing their unit keep an even cadence: divisors of 60 below a minute,
/// whole minutes dividing 60, whole hours dividing 24, and exactly one day.
/// Anything else is `None`.
pub fn interval_to_cron(interval_seconds: u64) -> Option<String> {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    match interval_seconds {
        0 => None,
        s if s < MINUTE => (MINUTE % s == 0).then(|| format!("*/{} * * * * *", s)),
        s if s < HOUR => {
            let minutes = s / MINUTE;
            (s % MINUTE == 0 && HOUR % s == 0).then(|| format!("0 */{} * * * *", minutes))
        }
        s if s < DAY => {
            let hours = s / HOUR;
            (s % HOUR == 0 && DAY % s == 0).then(|| format!("0 0 */{} * * *", hours))
        }
        DAY => Some("0 0 0 * * *".to_string()),
        _ => None,
    }
}

/// Periodically runs the pipeline on a cron schedule.
pub struct RunScheduler {
    pipeline: Arc<Pipeline>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl RunScheduler {
    /// `interval_seconds` of 0 is rejected; single runs call `Pipeline::run` directly.
    pub fn new(pipeline: Arc<Pipeline>, interval_seconds: u64) -> Result<Self, SchedulerError> {
        if interval_seconds == 0 {
            return Err(SchedulerError::Disabled);
        }

        let cron_expr = interval_to_cron(interval_seconds)
            .ok_or(SchedulerError::UnsupportedInterval(interval_seconds))?;
        let schedule = Schedule::from_str(&cron_expr).map_err(|source| SchedulerError::InvalidCron {
            expr: cron_expr.clone(),
            source,
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "RunScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            pipeline,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler loop in the background. The first run starts
    /// immediately so the dashboard has data before the first tick.
    pub async fn start(&self) {
        let pipeline = self.pipeline.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("RunScheduler: started, running initial pass");
            run_once(&pipeline).await;

            loop {
                let Some(next_tick) = schedule.upcoming(chrono::Utc).next() else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                };
                let now = chrono::Utc::now();
                if next_tick > now {
                    let duration = (next_tick - now).to_std().unwrap_or_default();
                    tokio::time::sleep(duration).await;
                }

                info!("RunScheduler: cron tick, starting run");
                run_once(&pipeline).await;
            }
        });

        *self.handle.write().await = Some(handle);
        info!("RunScheduler: started successfully");
    }

    /// Stop the scheduler. A run in progress is abandoned before it reaches
    /// the sinks if it has not already passed the compute barrier.
    pub async fn stop(&self) {
        if let Some(h) = self.handle.write().await.take() {
            h.abort();
            info!("RunScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}

async fn run_once(pipeline: &Pipeline) {
    match pipeline.run().await {
        Ok(report) => info!(
            assets = report.snapshots.len(),
            alerts = report.alerts.len(),
            notifications_failed = report.notifications_failed,
            "RunScheduler: run complete"
        ),
        Err(e) => error!(error = %e, "RunScheduler: run failed"),
    }
}
