//! Cached GitHub proxy: profile, processed repository list and stats.

use super::{GitHubError, GitHubRepo, GitHubSource, GitHubStats, GitHubUser, TtlCache};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Language label used when no repository declares one.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Language filter value that keeps every repository.
pub const ALL_LANGUAGES: &str = "all";

/// Serves one GitHub user's data through per-resource caches.
pub struct GitHubProxy {
    source: Arc<dyn GitHubSource>,
    username: String,
    user: TtlCache<GitHubUser>,
    repos: TtlCache<Vec<GitHubRepo>>,
}

impl std::fmt::Debug for GitHubProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubProxy")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl GitHubProxy {
    /// Creates a proxy for `username` whose entries live for `ttl`.
    pub fn new(source: Arc<dyn GitHubSource>, username: impl Into<String>, ttl: Duration) -> Self {
        Self {
            source,
            username: username.into(),
            user: TtlCache::new(ttl),
            repos: TtlCache::new(ttl),
        }
    }

    /// The proxied login.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The user's profile.
    #[instrument(skip(self), fields(username = %self.username))]
    pub async fn user(&self) -> Result<GitHubUser, GitHubError> {
        self.user
            .get_or_fetch(|| self.source.fetch_user(&self.username))
            .await
    }

    /// Non-fork repositories, most-starred first.
    #[instrument(skip(self), fields(username = %self.username))]
    pub async fn repos(&self) -> Result<Vec<GitHubRepo>, GitHubError> {
        self.repos
            .get_or_fetch(|| async {
                let raw = self.source.fetch_repos(&self.username).await?;
                let processed = process_repos(raw);
                info!(count = processed.len(), "Repositories refreshed");
                Ok::<_, GitHubError>(processed)
            })
            .await
    }

    /// Totals over [`Self::repos`].
    pub async fn stats(&self) -> Result<GitHubStats, GitHubError> {
        Ok(compute_stats(&self.repos().await?))
    }
}

/// Drops repositories whose name contains `fork`, then sorts by stars descending.
///
/// The sort is stable so equal-star repositories keep upstream order.
pub fn process_repos(mut repos: Vec<GitHubRepo>) -> Vec<GitHubRepo> {
    repos.retain(|repo| !repo.name.contains("fork"));
    repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    repos
}

/// Keeps repositories in `language` (case-sensitive, `"all"` keeps all), at most `limit`.
pub fn filter_by_language(
    repos: &[GitHubRepo],
    language: Option<&str>,
    limit: Option<usize>,
) -> Vec<GitHubRepo> {
    let language = language.filter(|l| *l != ALL_LANGUAGES);
    repos
        .iter()
        .filter(|repo| language.is_none_or(|l| repo.language.as_deref() == Some(l)))
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

/// Sums stars and forks and finds the most common language.
///
/// Ties between languages go to the one seen first.
pub fn compute_stats(repos: &[GitHubRepo]) -> GitHubStats {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        match tally.iter_mut().find(|(seen, _)| *seen == language) {
            Some((_, count)) => *count += 1,
            None => tally.push((language, 1)),
        }
    }

    let mut most_used: Option<(&str, usize)> = None;
    for (language, count) in tally {
        if most_used.is_none_or(|(_, best)| count > best) {
            most_used = Some((language, count));
        }
    }

    GitHubStats {
        total_stars: repos.iter().map(|r| r.stargazers_count).sum(),
        total_forks: repos.iter().map(|r| r.forks_count).sum(),
        total_repos: repos.len(),
        most_used_language: most_used
            .map(|(language, _)| language.to_string())
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repo(name: &str, stars: u64, forks: u64, language: Option<&str>) -> GitHubRepo {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        GitHubRepo {
            id: stars,
            name: name.to_string(),
            full_name: format!("someone/{name}"),
            description: None,
            html_url: format!("https://github.com/someone/{name}"),
            homepage: None,
            stargazers_count: stars,
            language: language.map(str::to_string),
            forks_count: forks,
            created_at: at,
            updated_at: at,
            topics: Vec::new(),
        }
    }

    fn names(repos: &[GitHubRepo]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn forks_by_name_are_dropped_and_stars_sorted() {
        let processed = process_repos(vec![
            repo("a", 1, 0, None),
            repo("my-fork", 99, 0, None),
            repo("b", 5, 0, None),
            repo("c", 1, 0, None),
        ]);
        assert_eq!(names(&processed), vec!["b", "a", "c"]);
    }

    #[test]
    fn stats_sum_and_pick_language() {
        let stats = compute_stats(&[
            repo("a", 3, 1, Some("Dart")),
            repo("b", 2, 2, Some("TypeScript")),
            repo("c", 1, 0, Some("TypeScript")),
            repo("d", 0, 0, None),
        ]);
        assert_eq!(stats.total_stars, 6);
        assert_eq!(stats.total_forks, 3);
        assert_eq!(stats.total_repos, 4);
        assert_eq!(stats.most_used_language, "TypeScript");
    }

    #[test]
    fn language_tie_goes_to_first_seen() {
        let stats = compute_stats(&[repo("a", 0, 0, Some("Rust")), repo("b", 0, 0, Some("Go"))]);
        assert_eq!(stats.most_used_language, "Rust");
    }

    #[test]
    fn no_languages_is_unknown() {
        assert_eq!(compute_stats(&[]).most_used_language, UNKNOWN_LANGUAGE);
        assert_eq!(compute_stats(&[]).total_repos, 0);
    }

    #[test]
    fn language_filter_and_limit() {
        let repos = vec![
            repo("a", 3, 0, Some("Dart")),
            repo("b", 2, 0, Some("Rust")),
            repo("c", 1, 0, Some("Dart")),
        ];
        assert_eq!(names(&filter_by_language(&repos, Some("Dart"), None)), vec!["a", "c"]);
        assert_eq!(names(&filter_by_language(&repos, Some("dart"), None)), Vec::<&str>::new());
        assert_eq!(names(&filter_by_language(&repos, Some("all"), Some(2))), vec!["a", "b"]);
        assert_eq!(filter_by_language(&repos, None, Some(0)).len(), 0);
    }
}
