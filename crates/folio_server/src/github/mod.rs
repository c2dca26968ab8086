//! GitHub profile and repository proxy.

mod cache;
mod client;
mod proxy;
mod types;

pub use cache::TtlCache;
pub use client::{GITHUB_ACCEPT, GitHubClient, GitHubError, GitHubSource, REPOS_PER_PAGE};
pub use proxy::{
    ALL_LANGUAGES, GitHubProxy, UNKNOWN_LANGUAGE, compute_stats, filter_by_language, process_repos,
};
pub use types::{GitHubRepo, GitHubStats, GitHubUser};
