//! Error types shared across the crate.

use thiserror::Error;

/// Failure to retrieve or decode data from the market data provider.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("request to market data provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("market data provider returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed market data payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl IngestionError {
    /// Transport failures, rate limiting and server errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            IngestionError::Transport(_) => true,
            IngestionError::Status { status } => *status == 429 || *status >= 500,
            IngestionError::Payload(_) => false,
        }
    }
}

/// Failure to deliver one alert message.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request to notification endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notification endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Run-fatal pipeline conditions. Nothing is forwarded to sinks when a run fails.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("market data unavailable: {0}")]
    IngestionUnavailable(#[source] IngestionError),

    #[error("market data provider returned no assets")]
    NoAssets,

    #[error("indicator computation aborted: {0}")]
    Compute(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("invalid URL in {key}: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
}
