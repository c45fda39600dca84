//! GitHub API client.
//!
//! One `reqwest::Client` is built per [`GithubClient`] and reused across
//! requests. Profile and repo fetches run concurrently, matching the
//! frontend's single round-trip expectation.

use std::time::Duration;

use folio_settings::GithubSettings;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use crate::types::{GithubOverview, GithubRepo, GithubUser, RepoSummary};

/// Request timeout for upstream GitHub calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Convenience alias for client operations.
pub type GithubResult<T> = Result<T, GithubError>;

/// Errors raised by the GitHub client.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// Transport-level failure (connect, timeout, decode).
    #[error("github request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status.
    #[error("github responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for logging.
        body: String,
    },
}

/// Client for the GitHub public API.
pub struct GithubClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    top_repos: usize,
}

impl GithubClient {
    /// Build a client from settings.
    ///
    /// Fails only if the underlying TLS/connection pool cannot be
    /// constructed, which is a startup-time condition.
    pub fn new(settings: &GithubSettings) -> GithubResult<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(USER_AGENT, HeaderValue::from_static("folio-backend"));
        let _ = headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_base.trim_end_matches('/').to_string(),
            username: settings.username.clone(),
            top_repos: settings.top_repos,
        })
    }

    /// The configured GitHub username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Fetch the user profile.
    pub async fn fetch_user(&self) -> GithubResult<GithubUser> {
        let url = format!("{}/users/{}", self.base_url, self.username);
        self.get_json(&url).await
    }

    /// Fetch the user's most recently updated repos.
    pub async fn fetch_repos(&self) -> GithubResult<Vec<GithubRepo>> {
        let url = format!(
            "{}/users/{}/repos?per_page={}&sort=updated",
            self.base_url, self.username, self.top_repos
        );
        self.get_json(&url).await
    }

    /// Fetch profile and repos concurrently and shape them for the widget.
    pub async fn fetch_overview(&self) -> GithubResult<GithubOverview> {
        let (user, repos) = tokio::join!(self.fetch_user(), self.fetch_repos());
        let user = user?;
        let repos = repos?;

        debug!(
            username = %self.username,
            repo_count = repos.len(),
            "github overview fetched"
        );

        Ok(GithubOverview {
            user: user.into(),
            repos: shape_repos(repos, self.top_repos),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> GithubResult<T> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url, status = status.as_u16(), body = %body, "github request rejected");
            return Err(GithubError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

/// Drop forks and keep the first `limit` repos, shaped for the widget.
fn shape_repos(repos: Vec<GithubRepo>, limit: usize) -> Vec<RepoSummary> {
    repos
        .into_iter()
        .filter(|repo| !repo.fork)
        .take(limit)
        .map(RepoSummary::from)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
