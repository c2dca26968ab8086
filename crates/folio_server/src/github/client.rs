//! Upstream GitHub REST access.

use super::{GitHubRepo, GitHubUser};
use async_trait::async_trait;
use derive_more::Display;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::{debug, instrument, warn};

/// Media type requested from the GitHub API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Repositories requested per listing.
pub const REPOS_PER_PAGE: usize = 20;

/// Error fetching from GitHub.
#[derive(Debug, Display)]
pub enum GitHubError {
    /// Transport or decoding failure.
    #[display("GitHub request failed: {}", _0)]
    Request(reqwest::Error),
    /// GitHub answered with a non-success status.
    #[display("GitHub returned {} for {}", status, url)]
    Status {
        /// Status returned upstream.
        status: reqwest::StatusCode,
        /// Requested URL.
        url: String,
    },
    /// Test double or other source failure.
    #[display("GitHub source unavailable: {}", _0)]
    Unavailable(String),
}

impl std::error::Error for GitHubError {}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err)
    }
}

/// Something that can answer user and repository lookups.
#[async_trait]
pub trait GitHubSource: Send + Sync {
    /// Fetches the public profile of `login`.
    async fn fetch_user(&self, login: &str) -> Result<GitHubUser, GitHubError>;

    /// Fetches the public repositories of `login`, most-starred first.
    async fn fetch_repos(&self, login: &str) -> Result<Vec<GitHubRepo>, GitHubError>;
}

/// [`GitHubSource`] backed by the real REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    base_url: String,
    client: reqwest::Client,
}

impl GitHubClient {
    /// Builds a client for `base_url` sending `user_agent` on every request.
    #[instrument(skip_all, fields(base_url = %base_url))]
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, GitHubError> {
        debug!(%url, "Fetching from GitHub");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "GitHub request failed");
            return Err(GitHubError::Status { status, url });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl GitHubSource for GitHubClient {
    #[instrument(skip(self))]
    async fn fetch_user(&self, login: &str) -> Result<GitHubUser, GitHubError> {
        self.get_json(format!("{}/users/{}", self.base_url, login)).await
    }

    #[instrument(skip(self))]
    async fn fetch_repos(&self, login: &str) -> Result<Vec<GitHubRepo>, GitHubError> {
        self.get_json(format!(
            "{}/users/{}/repos?sort=stars&per_page={}",
            self.base_url, login, REPOS_PER_PAGE
        ))
        .await
    }
}
