//! `/api/particles` handler.

use crate::error::ApiError;
use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use folio_content::{DEFAULT_PARTICLE_COUNT, Particle, particle_field};
use serde::Deserialize;
use tracing::{instrument, warn};

/// Largest field served in one request.
pub const MAX_PARTICLE_COUNT: usize = 500;

/// Requested field size.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParticlesQuery {
    /// Number of particles; defaults to 50.
    pub count: Option<usize>,
}

#[instrument(skip_all)]
pub(super) async fn field(
    query: Result<Query<ParticlesQuery>, QueryRejection>,
) -> Result<Json<Vec<Particle>>, ApiError> {
    let Query(query) = query?;
    let count = query.count.unwrap_or(DEFAULT_PARTICLE_COUNT);
    if count > MAX_PARTICLE_COUNT {
        warn!(count, "Particle count over limit");
        return Err(ApiError::bad_request(format!(
            "count must be at most {}",
            MAX_PARTICLE_COUNT
        )));
    }
    Ok(Json(particle_field(count)))
}
