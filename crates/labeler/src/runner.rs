//! # Labeling Run
//!
//! One pass over one pull request: read its state, load the policy,
//! reconcile, then apply the result.

use crate::config::RunConfig;
use crate::error::{GitHubError, LabelerError};
use crate::github::GitHubClient;
use crate::outputs::ActionOutputs;
use policy::{reconcile, Policy};
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

/// What a run decided and what it changed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunReport {
    pub pr_number: u64,
    pub changed_files: usize,
    /// Labels whose patterns cover every changed file
    pub to_add: Vec<String>,
    /// Present labels whose patterns no longer cover the changes
    pub to_remove: Vec<String>,
    /// Labels actually detached (empty unless sync is on)
    pub removed: Vec<String>,
    pub new_labels: Vec<String>,
    pub all_labels: Vec<String>,
    pub dry_run: bool,
}

/// Drives a labeling run against the GitHub API.
pub struct Labeler {
    config: RunConfig,
    client: GitHubClient,
}

impl Labeler {
    /// Create a runner with a client built from `config`.
    ///
    /// # Errors
    /// Returns `LabelerError::GitHub` if the API client cannot be created.
    pub fn new(config: RunConfig) -> Result<Self, LabelerError> {
        let client = GitHubClient::new(
            &config.api_url,
            config.token.clone(),
            config.owner.clone(),
            config.repo.clone(),
        )?;
        Ok(Self { config, client })
    }

    /// Label the configured pull request.
    ///
    /// Nothing is changed if the policy fails to load. Label additions and
    /// removals are separate calls: if one fails the run stops with that
    /// error and whatever was already applied stays applied.
    ///
    /// # Errors
    /// Returns `LabelerError::Policy` for an invalid policy document and
    /// `LabelerError::GitHub` for any failed API call.
    #[instrument(skip(self), fields(pr = self.config.pr_number, repo = %self.config.repo))]
    pub async fn run(&self) -> Result<RunReport, LabelerError> {
        let pr_number = self.config.pr_number;

        let pr = self.client.get_pull_request(pr_number).await?;
        info!(
            pr = pr.number,
            head = %pr.head_sha,
            labels = ?pr.labels,
            "Fetched pull request"
        );
        let git_ref = self.config.sha.clone().unwrap_or(pr.head_sha);

        let policy = self.load_policy(&git_ref).await?;
        info!(labels = policy.len(), "Loaded label policy");

        let changed_files = self.client.list_changed_files(pr_number).await?;
        info!(files = changed_files.len(), "Fetched changed files");

        let result = reconcile(&policy, &changed_files, &pr.labels);
        info!(
            to_add = ?result.to_add,
            to_remove = ?result.to_remove,
            "Reconciled labels"
        );

        let mut removed = Vec::new();
        if self.config.dry_run {
            info!("Dry run, leaving labels unchanged");
        } else {
            self.client.add_labels(pr_number, &result.to_add).await?;

            if self.config.sync_labels && !result.to_remove.is_empty() {
                for label in &result.to_remove {
                    self.client.remove_label(pr_number, label).await?;
                    removed.push(label.clone());
                }
            }
        }

        let outputs = ActionOutputs {
            new_labels: result.new_labels(&pr.labels),
            all_labels: result.resulting_labels(&pr.labels, self.config.sync_labels),
        };
        if let Some(path) = &self.config.output_file {
            outputs.append_to(path).await?;
        }

        Ok(RunReport {
            pr_number,
            changed_files: changed_files.len(),
            to_add: result.to_add,
            to_remove: result.to_remove,
            removed,
            new_labels: outputs.new_labels,
            all_labels: outputs.all_labels,
            dry_run: self.config.dry_run,
        })
    }

    /// Read the policy from the working tree, or from the repository at
    /// `git_ref` when no local copy exists.
    async fn load_policy(&self, git_ref: &str) -> Result<Policy, LabelerError> {
        let path = self.config.configuration_path.clone();

        let text = match tokio::fs::read_to_string(Path::new(&path)).await {
            Ok(text) => {
                info!(path = %path, "Reading label policy from working tree");
                text
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path, git_ref = %git_ref, "Fetching label policy from repository");
                self.client
                    .get_file_content(&path, git_ref)
                    .await
                    .map_err(|e| match e {
                        GitHubError::Api { status: 404, .. } => LabelerError::Config(format!(
                            "label policy '{path}' not found in the working tree or at {git_ref}"
                        )),
                        other => other.into(),
                    })?
            }
            Err(source) => {
                warn!(path = %path, error = %source, "Failed to read label policy");
                return Err(LabelerError::Io {
                    path: path.into(),
                    source,
                });
            }
        };

        Policy::from_yaml_str(&text).map_err(|source| LabelerError::Policy { path, source })
    }
}
