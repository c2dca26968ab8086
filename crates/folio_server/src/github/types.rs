//! GitHub REST payloads mirrored by the proxy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subset of `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubUser {
    /// Login handle.
    pub login: String,
    /// Display name (may be unset on GitHub).
    pub name: Option<String>,
    /// Profile bio.
    pub bio: Option<String>,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Profile page URL.
    pub html_url: String,
    /// Follower count.
    pub followers: u64,
    /// Following count.
    pub following: u64,
    /// Public repository count.
    pub public_repos: u64,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Subset of one entry of `GET /users/{login}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRepo {
    /// Repository id.
    pub id: u64,
    /// Short name.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Description.
    pub description: Option<String>,
    /// Repository page URL.
    pub html_url: String,
    /// Project homepage.
    pub homepage: Option<String>,
    /// Star count.
    pub stargazers_count: u64,
    /// Primary language.
    pub language: Option<String>,
    /// Fork count.
    pub forks_count: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Topics.
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Aggregate figures over the proxied repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubStats {
    /// Sum of stars.
    pub total_stars: u64,
    /// Sum of forks.
    pub total_forks: u64,
    /// Number of repositories.
    pub total_repos: usize,
    /// Language with the most repositories, or `"Unknown"`.
    pub most_used_language: String,
}
