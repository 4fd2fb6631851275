//! Environment-driven configuration.
//!
//! Values are read once at startup and passed explicitly into the pipeline and
//! its adapters. The indicator and alert code takes no configuration.

use crate::core::scheduler::interval_to_cron;
use crate::error::ConfigError;
use std::env;
use std::str::FromStr;
use url::Url;

pub const DEFAULT_LUNARCRUSH_URL: &str = "https://api.lunarcrush.com/v2";
pub const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";
pub const DEFAULT_ASSET_LIMIT: usize = 100;
pub const DEFAULT_INGEST_MAX_RETRIES: usize = 3;
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;

/// Current deployment environment (`APP_ENV`), `sandbox` when unset.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct LunarCrushConfig {
    pub api_key: String,
    pub base_url: String,
    pub max_retries: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub lunarcrush: LunarCrushConfig,
    /// `None` runs notifications in log-only mode.
    pub telegram: Option<TelegramConfig>,
    pub asset_limit: usize,
    pub worker_count: usize,
    /// Per-asset sparkline requests allowed in flight at once.
    pub fetch_concurrency: usize,
    /// 0 means a single run; otherwise an interval `interval_to_cron` accepts.
    pub eval_interval_seconds: u64,
    pub port: u16,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("LUNARCRUSH_API_KEY").ok_or(ConfigError::Missing("LUNARCRUSH_API_KEY"))?;
        let lunarcrush_url = get("LUNARCRUSH_API_URL").unwrap_or_else(|| DEFAULT_LUNARCRUSH_URL.to_string());
        validate_url("LUNARCRUSH_API_URL", &lunarcrush_url)?;

        let telegram = match (get("TELEGRAM_TOKEN"), get("TELEGRAM_CHAT_ID")) {
            (Some(token), Some(chat_id)) => {
                let base_url = get("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_TELEGRAM_URL.to_string());
                validate_url("TELEGRAM_API_URL", &base_url)?;
                Some(TelegramConfig {
                    token,
                    chat_id,
                    base_url,
                })
            }
            _ => None,
        };

        let asset_limit = parse_or("ASSET_LIMIT", get("ASSET_LIMIT"), DEFAULT_ASSET_LIMIT)?;
        if asset_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "ASSET_LIMIT",
                value: "0".to_string(),
            });
        }

        let default_workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let worker_count = parse_or("WORKER_CONCURRENCY", get("WORKER_CONCURRENCY"), default_workers)?.max(1);

        let fetch_concurrency = parse_or(
            "FETCH_CONCURRENCY",
            get("FETCH_CONCURRENCY"),
            DEFAULT_FETCH_CONCURRENCY,
        )?
        .max(1);

        let eval_interval_seconds = parse_or("EVAL_INTERVAL_SECONDS", get("EVAL_INTERVAL_SECONDS"), 0)?;
        if eval_interval_seconds != 0 && interval_to_cron(eval_interval_seconds).is_none() {
            return Err(ConfigError::Invalid {
                key: "EVAL_INTERVAL_SECONDS",
                value: eval_interval_seconds.to_string(),
            });
        }

        Ok(Self {
            lunarcrush: LunarCrushConfig {
                api_key,
                base_url: lunarcrush_url,
                max_retries: parse_or(
                    "INGEST_MAX_RETRIES",
                    get("INGEST_MAX_RETRIES"),
                    DEFAULT_INGEST_MAX_RETRIES,
                )?,
            },
            telegram,
            asset_limit,
            worker_count,
            fetch_concurrency,
            eval_interval_seconds,
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn validate_url(key: &'static str, raw: &str) -> Result<(), ConfigError> {
    Url::parse(raw)
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidUrl { key, source })
}
