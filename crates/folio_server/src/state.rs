//! Shared application state handed to every handler.

use crate::config::ServerConfig;
use crate::github::{GitHubClient, GitHubError, GitHubProxy};
use crate::sessions::SessionManager;
use folio_content::Catalog;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// State cloned into each request.
#[derive(Debug, Clone, derive_new::new)]
pub struct AppState {
    /// Cached GitHub proxy.
    pub github: Arc<GitHubProxy>,
    /// Read-only project catalog.
    pub catalog: Arc<Catalog>,
    /// Live play sessions.
    pub sessions: SessionManager,
}

impl AppState {
    /// Builds the production state from configuration.
    ///
    /// An unreadable catalog logs a warning and serves an empty list.
    #[instrument(skip_all, fields(username = %config.github_username()))]
    pub fn from_config(config: &ServerConfig) -> Result<Self, GitHubError> {
        let client = GitHubClient::new(config.github_api_base(), config.user_agent())?;
        let github = GitHubProxy::new(
            Arc::new(client),
            config.github_username().clone(),
            config.cache_ttl(),
        );
        let catalog = Catalog::from_file(config.catalog_path()).unwrap_or_else(|err| {
            warn!(error = %err, "Serving an empty project catalog");
            Catalog::default()
        });
        info!(projects = catalog.len(), "Application state ready");
        let sessions = SessionManager::with_limits(*config.max_sessions(), config.session_idle());
        Ok(Self::new(Arc::new(github), Arc::new(catalog), sessions))
    }
}
