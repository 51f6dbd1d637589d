//! Webhook event payload handed to the run by the Actions runner.

use crate::error::{EventSource, LabelerError};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    pull_request: Option<RawPullRequest>,
    #[serde(default)]
    number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: u64,
}

/// The parts of a `pull_request` / `pull_request_target` event the run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub number: u64,
}

impl PullRequestEvent {
    /// Read and parse an event payload file.
    ///
    /// # Errors
    /// Returns `LabelerError::Event` when the file cannot be read, is not
    /// JSON, or carries no pull request number.
    pub fn from_path(path: &Path) -> Result<Self, LabelerError> {
        let wrap = |source: EventSource| LabelerError::Event {
            path: path.to_path_buf(),
            source,
        };

        let text = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
        Self::from_json(&text).map_err(wrap)
    }

    fn from_json(text: &str) -> Result<Self, EventSource> {
        let raw: RawEvent = serde_json::from_str(text)?;
        raw.pull_request
            .map(|pr| pr.number)
            .or(raw.number)
            .map(|number| Self { number })
            .ok_or(EventSource::MissingNumber)
    }
}
