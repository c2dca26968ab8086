//! HTTP routes under `/api`.

mod contact;
mod games;
mod github;
mod particles;
mod projects;

pub use contact::{ContactRequest, validate_contact};
pub use games::{CreateGameRequest, GameSnapshot, ModeRequest, MoveRequest};
pub use github::ReposQuery;
pub use particles::{MAX_PARTICLE_COUNT, ParticlesQuery};
pub use projects::{ProjectDetail, ProjectList};

use crate::state::AppState;
use axum::body::Body;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tracing::{debug, info};

/// Builds the API router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/github/user", get(github::user))
        .route("/api/github/repos", get(github::repos))
        .route("/api/github/stats", get(github::stats))
        .route("/api/projects", get(projects::list))
        .route("/api/projects/{id}", get(projects::detail))
        .route("/api/particles", get(particles::field))
        .route("/api/games", post(games::create))
        .route("/api/games/{id}", get(games::show))
        .route("/api/games/{id}/moves", post(games::play))
        .route("/api/games/{id}/mode", post(games::set_mode))
        .route("/api/games/{id}/new", post(games::new_game))
        .route("/api/games/{id}/scores/reset", post(games::reset_scores))
        .route("/api/contact", post(contact::submit))
        .layer(
            ServiceBuilder::new()
                .map_request(log_request)
                .layer(middleware::from_fn(log_response)),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn log_request(req: Request<Body>) -> Request<Body> {
    debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

async fn log_response(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    info!(%method, %uri, status = %response.status(), "Response sent");
    response
}
