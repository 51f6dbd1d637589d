//! Error types for a labeling run.

use policy::ConfigurationError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by the GitHub REST client.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded, reset in {reset_in:?}")]
    RateLimitExceeded { reset_in: Duration },

    #[error("Invalid API URL '{0}'")]
    InvalidUrl(String),

    #[error("Failed to decode file content: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that abort a labeling run.
#[derive(Debug, Error)]
pub enum LabelerError {
    /// Missing or inconsistent run settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// The label policy document could not be loaded
    #[error("Invalid label policy in {path}: {source}")]
    Policy {
        path: String,
        #[source]
        source: ConfigurationError,
    },

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error("Failed to read event payload {path}: {source}")]
    Event {
        path: PathBuf,
        #[source]
        source: EventSource,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why an event payload could not be used.
#[derive(Debug, Error)]
pub enum EventSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("payload has no pull request number")]
    MissingNumber,
}
