//! # GitHub REST Client
//!
//! The handful of pull request and label calls a labeling run makes. An
//! exhausted rate limit is reported as its own error; there are no retries.

use crate::error::GitHubError;
use base64::Engine as _;
use reqwest::{header, Client as HttpClient, Method, Response, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Largest page size the pull request files endpoint accepts.
const FILES_PER_PAGE: usize = 100;

const USER_AGENT: &str = concat!("labeler/", env!("CARGO_PKG_VERSION"));

/// GitHub API client scoped to one repository.
#[derive(Clone)]
pub struct GitHubClient {
    http_client: HttpClient,
    base_url: Url,
    token: String,
    owner: String,
    repo: String,
}

/// Pull request state at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub head_sha: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GitHubLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GitHubRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GitHubPR {
    number: u64,
    head: GitHubRef,
    #[serde(default)]
    labels: Vec<GitHubLabel>,
}

#[derive(Debug, Deserialize)]
struct GitHubFile {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct GitHubContent {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

impl GitHubClient {
    /// Create a client for `owner/repo` against `api_url`.
    ///
    /// # Errors
    /// Returns `GitHubError::InvalidUrl` if `api_url` cannot be used as a base
    /// URL and `GitHubError::Http` if the HTTP client cannot be built.
    pub fn new(
        api_url: &str,
        token: String,
        owner: String,
        repo: String,
    ) -> Result<Self, GitHubError> {
        let base_url = Url::parse(api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| GitHubError::InvalidUrl(api_url.to_string()))?;

        let http_client = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            token,
            owner,
            repo,
        })
    }

    /// Fetch a pull request's head commit and current labels.
    #[instrument(skip(self), fields(pr_number = %pr_number))]
    pub async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest, GitHubError> {
        let number = pr_number.to_string();
        let url = self.repo_url(&["pulls", &number])?;

        let response = self.request(Method::GET, url, None).await?;
        let pr: GitHubPR = Self::ensure_success(response).await?.json().await?;

        let labels: Vec<String> = pr.labels.into_iter().map(|label| label.name).collect();
        debug!("Retrieved {} labels for PR #{}", labels.len(), pr_number);

        Ok(PullRequest {
            number: pr.number,
            head_sha: pr.head.sha,
            labels,
        })
    }

    /// List every file path the pull request changes, following pagination.
    #[instrument(skip(self), fields(pr_number = %pr_number))]
    pub async fn list_changed_files(&self, pr_number: u64) -> Result<Vec<String>, GitHubError> {
        let number = pr_number.to_string();
        let mut files = Vec::new();

        for page in 1.. {
            let mut url = self.repo_url(&["pulls", &number, "files"])?;
            url.query_pairs_mut()
                .append_pair("per_page", &FILES_PER_PAGE.to_string())
                .append_pair("page", &page.to_string());

            let response = self.request(Method::GET, url, None).await?;
            let batch: Vec<GitHubFile> = Self::ensure_success(response).await?.json().await?;
            let batch_len = batch.len();
            files.extend(batch.into_iter().map(|file| file.filename));

            if batch_len < FILES_PER_PAGE {
                break;
            }
        }

        debug!("PR #{} changes {} files", pr_number, files.len());
        Ok(files)
    }

    /// Read a repository file at `git_ref` through the contents API.
    #[instrument(skip(self))]
    pub async fn get_file_content(&self, path: &str, git_ref: &str) -> Result<String, GitHubError> {
        let mut segments = vec!["contents"];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));

        let mut url = self.repo_url(&segments)?;
        url.query_pairs_mut().append_pair("ref", git_ref);

        let response = self.request(Method::GET, url, None).await?;
        let content: GitHubContent = Self::ensure_success(response).await?.json().await?;

        decode_content(&content)
    }

    /// Add labels to a pull request. Does nothing for an empty list.
    #[instrument(skip(self), fields(pr_number = %pr_number, labels = ?labels))]
    pub async fn add_labels(&self, pr_number: u64, labels: &[String]) -> Result<(), GitHubError> {
        if labels.is_empty() {
            return Ok(());
        }

        let number = pr_number.to_string();
        let url = self.repo_url(&["issues", &number, "labels"])?;

        let body = serde_json::json!({ "labels": labels });
        let response = self.request(Method::POST, url, Some(body)).await?;
        Self::ensure_success(response).await?;

        info!("Added {} labels to PR #{}", labels.len(), pr_number);
        Ok(())
    }

    /// Remove a label from a pull request.
    #[instrument(skip(self), fields(pr_number = %pr_number, label = %label))]
    pub async fn remove_label(&self, pr_number: u64, label: &str) -> Result<(), GitHubError> {
        let number = pr_number.to_string();
        let url = self.repo_url(&["issues", &number, "labels", label])?;

        let response = self.request(Method::DELETE, url, None).await?;

        if response.status() == StatusCode::NOT_FOUND {
            // Label is already gone
            debug!(
                "Label '{}' not found on PR #{} (already removed)",
                label, pr_number
            );
            return Ok(());
        }

        Self::ensure_success(response).await?;
        debug!("Removed label '{}' from PR #{}", label, pr_number);
        Ok(())
    }

    /// `{base}/repos/{owner}/{repo}/{segments...}` with each segment escaped.
    fn repo_url(&self, segments: &[&str]) -> Result<Url, GitHubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str()])
            .extend(segments);
        Ok(url)
    }

    /// Send an authenticated API request.
    async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<Response, GitHubError> {
        let mut request = self
            .http_client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        match rate_limit_error(&response) {
            Some(err) => Err(err),
            None => Ok(response),
        }
    }

    /// Turn a non-2xx response into `GitHubError::Api`.
    async fn ensure_success(response: Response) -> Result<Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GitHubApiError>(&text)
            .map(|e| e.message)
            .unwrap_or(text);

        Err(GitHubError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// A 403 with an exhausted quota becomes `RateLimitExceeded`.
fn rate_limit_error(response: &Response) -> Option<GitHubError> {
    let headers = response.headers();
    let exhausted = response.status() == StatusCode::FORBIDDEN
        && headers
            .get("x-ratelimit-remaining")
            .and_then(|h| h.to_str().ok())
            .is_some_and(|remaining| remaining.trim() == "0");
    if !exhausted {
        return None;
    }

    let reset_in = headers
        .get("x-ratelimit-reset")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .map_or(Duration::ZERO, |reset_timestamp| {
            let seconds = reset_timestamp - chrono::Utc::now().timestamp();
            Duration::from_secs(u64::try_from(seconds).unwrap_or(0))
        });

    Some(GitHubError::RateLimitExceeded { reset_in })
}

fn decode_content(content: &GitHubContent) -> Result<String, GitHubError> {
    if content.encoding != "base64" {
        return Ok(content.content.clone());
    }

    // The API wraps the payload at 60 columns.
    let packed: String = content
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(packed)
        .map_err(|e| GitHubError::Decode(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| GitHubError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> GitHubClient {
        GitHubClient::new(api_url, "t".into(), "acme".into(), "web".into()).unwrap()
    }

    #[test]
    fn test_repo_url_escapes_segments() {
        let url = client("https://api.github.com")
            .repo_url(&["issues", "5", "labels", "good first issue"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/web/issues/5/labels/good%20first%20issue"
        );
    }

    #[test]
    fn test_repo_url_keeps_enterprise_prefix() {
        let url = client("https://ghe.example.com/api/v3/")
            .repo_url(&["pulls", "9"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/web/pulls/9"
        );
    }

    #[test]
    fn test_invalid_api_url() {
        let err = GitHubClient::new("not a url", "t".into(), "a".into(), "b".into()).err();
        assert!(matches!(err, Some(GitHubError::InvalidUrl(_))));
    }

    #[test]
    fn test_decode_wrapped_base64() {
        let content = GitHubContent {
            content: "ZG9jczog\nJyoqLyou\nbWQnCg==\n".to_string(),
            encoding: "base64".to_string(),
        };
        assert_eq!(decode_content(&content).unwrap(), "docs: '**/*.md'\n");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let content = GitHubContent {
            content: "@@@".to_string(),
            encoding: "base64".to_string(),
        };
        assert!(matches!(decode_content(&content), Err(GitHubError::Decode(_))));
    }
}
