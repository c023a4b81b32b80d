use std::time::Duration;

use thiserror::Error as ThisError;

/// Everything that can go wrong between a fetch operation and the market-data gateway.
#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("API request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("API request failed: {0}")]
    Transport(String),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("could not decode API response: {0}")]
    Decode(String),

    #[error("{0}")]
    DataMissing(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured duration on the error
            return FetchError::Timeout(Duration::ZERO);
        }
        if let Some(status) = err.status() {
            return FetchError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_decode() || err.is_body() {
            return FetchError::Decode(err.to_string());
        }
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Settings file problems.
#[derive(ThisError, Debug)]
pub enum SettingsError {
    #[error("settings I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("settings serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("asset id must not be empty")]
    EmptyAssetId,
}

/// User input rejected on the UI thread, before any fetch is dispatched.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("'{0}' is not a valid number")]
    NotANumber(String),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("unknown day window '{0}'")]
    BadDayWindow(String),
}
