//! # Run Configuration
//!
//! Everything a run needs is collected up front into [`RunConfig`]. Inside
//! GitHub Actions the defaults come from the runner environment
//! (`GITHUB_REPOSITORY`, `GITHUB_EVENT_PATH`, `GITHUB_SHA`, ...); every value
//! can also be passed on the command line.

use crate::error::LabelerError;
use crate::event::PullRequestEvent;
use clap::Args;
use std::path::PathBuf;

/// Default location of the label policy inside the repository.
pub const DEFAULT_CONFIGURATION_PATH: &str = ".github/labeler.yml";

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Command-line and environment inputs for a run.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Token used to call the GitHub API
    #[arg(long = "repo-token", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Repository in owner/repo format
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Pull request number (read from the event payload when omitted)
    #[arg(long = "pr-number")]
    pub pr_number: Option<u64>,

    /// Path to the webhook event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Commit the policy file is read from (defaults to the PR head)
    #[arg(long, env = "GITHUB_SHA")]
    pub sha: Option<String>,

    /// Path to the label policy file
    #[arg(
        long = "configuration-path",
        env = "LABELER_CONFIGURATION_PATH",
        default_value = DEFAULT_CONFIGURATION_PATH
    )]
    pub configuration_path: String,

    /// Remove labels whose patterns no longer cover the changed files
    #[arg(long = "sync-labels", env = "LABELER_SYNC_LABELS")]
    pub sync_labels: bool,

    /// GitHub API base URL
    #[arg(long = "api-url", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File that receives `new-labels` and `all-labels` outputs
    #[arg(long = "output-file", env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// Compute labels without changing the pull request
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Validated settings for one labeling run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
    pub sha: Option<String>,
    pub configuration_path: String,
    pub sync_labels: bool,
    pub api_url: String,
    pub output_file: Option<PathBuf>,
    pub dry_run: bool,
}

impl RunArgs {
    /// Validate the inputs and resolve the pull request number.
    ///
    /// # Errors
    /// Returns `LabelerError::Config` for a malformed repository or when no
    /// pull request number can be determined, and `LabelerError::Event` when
    /// the event payload cannot be read.
    pub fn resolve(self) -> Result<RunConfig, LabelerError> {
        let (owner, repo) = parse_repo(&self.repository)?;

        let pr_number = match (self.pr_number, &self.event_path) {
            (Some(number), _) => number,
            (None, Some(path)) => PullRequestEvent::from_path(path)?.number,
            (None, None) => {
                return Err(LabelerError::Config(
                    "no pull request number: pass --pr-number or set GITHUB_EVENT_PATH"
                        .to_string(),
                ))
            }
        };

        if self.token.trim().is_empty() {
            return Err(LabelerError::Config("repo token is empty".to_string()));
        }

        if self.configuration_path.trim().is_empty() {
            return Err(LabelerError::Config(
                "configuration path is empty".to_string(),
            ));
        }

        Ok(RunConfig {
            token: self.token,
            owner: owner.to_string(),
            repo: repo.to_string(),
            pr_number,
            sha: self.sha.filter(|sha| !sha.is_empty()),
            configuration_path: self.configuration_path,
            sync_labels: self.sync_labels,
            api_url: self.api_url.trim_end_matches('/').to_string(),
            output_file: self.output_file,
            dry_run: self.dry_run,
        })
    }
}

/// Split `owner/repo`.
///
/// # Errors
/// Returns `LabelerError::Config` unless the input has exactly two
/// non-empty parts.
pub fn parse_repo(repository: &str) -> Result<(&str, &str), LabelerError> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(LabelerError::Config(format!(
            "invalid repository '{repository}', expected owner/repo"
        ))),
    }
}
