//! Folio portfolio backend.
//!
//! Serves a cached GitHub profile proxy, the featured project catalog,
//! deterministic particle fields and tic-tac-toe sessions over HTTP.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod github;
pub mod routes;
pub mod sessions;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use github::{GitHubClient, GitHubError, GitHubProxy, GitHubSource};
pub use routes::{GameSnapshot, router};
pub use sessions::SessionManager;
pub use state::AppState;
