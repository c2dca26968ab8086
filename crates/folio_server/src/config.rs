//! Server configuration.
//!
//! Layered: serde defaults, then an optional TOML file, then the
//! `GITHUB_USERNAME` and `PORT` environment variables, then CLI flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable overriding [`ServerConfig::github_username`].
pub const GITHUB_USERNAME_VAR: &str = "GITHUB_USERNAME";
/// Environment variable overriding [`ServerConfig::port`].
pub const PORT_VAR: &str = "PORT";

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// GitHub login whose profile and repositories are proxied.
    #[serde(default = "default_github_username")]
    github_username: String,

    /// Base URL of the GitHub REST API.
    #[serde(default = "default_github_api_base")]
    github_api_base: String,

    /// Seconds an upstream response stays cached.
    #[serde(default = "default_cache_ttl_secs")]
    cache_ttl_secs: u64,

    /// User-Agent sent upstream (GitHub rejects requests without one).
    #[serde(default = "default_user_agent")]
    user_agent: String,

    /// TOML file holding the featured project catalog.
    #[serde(default = "default_catalog_path")]
    catalog_path: PathBuf,

    /// Most play sessions kept in memory at once.
    #[serde(default = "default_max_sessions")]
    max_sessions: usize,

    /// Seconds after which an untouched play session is dropped.
    #[serde(default = "default_session_idle_secs")]
    session_idle_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_github_username() -> String {
    "octocat".to_string()
}

fn default_github_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_user_agent() -> String {
    format!("folio/{}", env!("CARGO_PKG_VERSION"))
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("content/projects.toml")
}

fn default_max_sessions() -> usize {
    1024
}

fn default_session_idle_secs() -> u64 {
    3600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            github_username: default_github_username(),
            github_api_base: default_github_api_base(),
            cache_ttl_secs: default_cache_ttl_secs(),
            user_agent: default_user_agent(),
            catalog_path: default_catalog_path(),
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl ServerConfig {
    /// Parses configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(github_username = %config.github_username, "Config loaded successfully");
        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    #[instrument(skip(self, lookup))]
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(username) = lookup(GITHUB_USERNAME_VAR).filter(|u| !u.trim().is_empty()) {
            debug!(%username, "GitHub username overridden from environment");
            self.github_username = username.trim().to_string();
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::new(format!("{} is not a valid port: {:?}", PORT_VAR, port)))?;
            debug!(port = self.port, "Port overridden from environment");
        }
        Ok(self)
    }

    /// Applies overrides from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overrides the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the GitHub API base URL.
    pub fn with_github_api_base(mut self, base: impl Into<String>) -> Self {
        self.github_api_base = base.into();
        self
    }

    /// Overrides the catalog path.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// Cache lifetime as a [`std::time::Duration`].
    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache_ttl_secs)
    }

    /// Idle lifetime of a play session.
    pub fn session_idle(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.session_idle_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
