//! `/api/projects` handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use folio_content::{Project, ProjectQuery, RELATED_LIMIT};
use serde::Serialize;
use tracing::{instrument, warn};

/// Filtered list plus the category tabs.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectList {
    /// `"all"` then each category in catalog order.
    pub categories: Vec<String>,
    /// Matching projects.
    pub projects: Vec<Project>,
}

/// One project with a few others to browse next.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    /// The requested project.
    pub project: Project,
    /// Up to three other projects.
    pub related: Vec<Project>,
}

#[instrument(skip_all)]
pub(super) async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProjectQuery>, QueryRejection>,
) -> Result<Json<ProjectList>, ApiError> {
    let Query(query) = query?;
    Ok(Json(ProjectList {
        categories: state.catalog.categories(),
        projects: state.catalog.filter(&query).into_iter().cloned().collect(),
    }))
}

#[instrument(skip_all)]
pub(super) async fn detail(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ProjectDetail>, ApiError> {
    let Path(id) = path?;
    let project = state.catalog.find(&id).ok_or_else(|| {
        warn!(%id, "Unknown project");
        ApiError::not_found("Project not found")
    })?;
    Ok(Json(ProjectDetail {
        project: project.clone(),
        related: state
            .catalog
            .related(&id, RELATED_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    }))
}
