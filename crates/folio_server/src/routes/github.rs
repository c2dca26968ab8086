//! `/api/github/*` handlers.

use crate::error::ApiError;
use crate::github::{GitHubRepo, GitHubStats, GitHubUser, filter_by_language};
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::{error, instrument};

const USER_FAILURE: &str = "Failed to fetch user data";
const REPOS_FAILURE: &str = "Failed to fetch repos";

/// Optional narrowing of the repository list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReposQuery {
    /// Exact language, or `"all"`.
    pub language: Option<String>,
    /// Maximum number of repositories.
    pub limit: Option<usize>,
}

#[instrument(skip(state))]
pub(super) async fn user(State(state): State<AppState>) -> Result<Json<GitHubUser>, ApiError> {
    state.github.user().await.map(Json).map_err(|err| {
        error!(error = %err, "GitHub user fetch failed");
        ApiError::internal(USER_FAILURE)
    })
}

#[instrument(skip_all)]
pub(super) async fn repos(
    State(state): State<AppState>,
    query: Result<Query<ReposQuery>, QueryRejection>,
) -> Result<Json<Vec<GitHubRepo>>, ApiError> {
    let Query(query) = query?;
    let repos = state.github.repos().await.map_err(|err| {
        error!(error = %err, "GitHub repos fetch failed");
        ApiError::internal(REPOS_FAILURE)
    })?;
    Ok(Json(filter_by_language(
        &repos,
        query.language.as_deref(),
        query.limit,
    )))
}

#[instrument(skip(state))]
pub(super) async fn stats(State(state): State<AppState>) -> Result<Json<GitHubStats>, ApiError> {
    state.github.stats().await.map(Json).map_err(|err| {
        error!(error = %err, "GitHub stats fetch failed");
        ApiError::internal(REPOS_FAILURE)
    })
}
