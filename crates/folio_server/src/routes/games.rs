//! `/api/games` handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use folio_tictactoe::{GameMode, Mark, Phase, Scoreboard, Session, SessionError};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Body of `POST /api/games`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// Mode of the new session.
    #[serde(default)]
    pub mode: GameMode,
}

/// Body of `POST /api/games/{id}/moves`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Cell index, 0 to 8 in reading order.
    pub position: usize,
}

/// Body of `POST /api/games/{id}/mode`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModeRequest {
    /// Mode to switch to.
    pub mode: GameMode,
}

/// Session as seen by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Session id.
    pub id: String,
    /// Who controls O.
    pub mode: GameMode,
    /// Nine cells, `null` when empty.
    pub board: Vec<Option<Mark>>,
    /// Mark due to move.
    pub next: Mark,
    /// Phase of the current game.
    pub phase: Phase,
    /// Cells of the completed line, when won.
    pub winning_line: Option<[usize; 3]>,
    /// Running score.
    pub scores: Scoreboard,
    /// Cell the computer played during this request.
    pub computer_move: Option<usize>,
}

impl GameSnapshot {
    /// Captures `session` under `id`.
    pub fn capture(id: impl Into<String>, session: &Session, computer_move: Option<usize>) -> Self {
        let game = session.game();
        Self {
            id: id.into(),
            mode: session.mode(),
            board: game.board().squares().iter().map(|s| s.mark()).collect(),
            next: game.next(),
            phase: game.phase(),
            winning_line: game.result().winning_line(),
            scores: session.scores(),
            computer_move,
        }
    }
}

#[instrument(skip_all)]
pub(super) async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GameSnapshot>), ApiError> {
    let Json(request) = body?;
    let (id, session) = state.sessions.create(request.mode).await;
    Ok((StatusCode::CREATED, Json(GameSnapshot::capture(id, &session, None))))
}

#[instrument(skip_all)]
pub(super) async fn show(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let Path(id) = path?;
    let session = state.sessions.get(&id).await?;
    Ok(Json(GameSnapshot::capture(id, &session, None)))
}

/// Applies the human move, then the computer reply when one is due.
#[instrument(skip_all)]
pub(super) async fn play(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let Path(id) = path?;
    let Json(request) = body?;
    let key = id.clone();
    let snapshot = state
        .sessions
        .with_session(&id, move |session| {
            session.play(request.position)?;
            let computer_move = if session.awaiting_computer() {
                Some(session.computer_move()?)
            } else {
                None
            };
            info!(session_id = %key, position = request.position, ?computer_move, "Move applied");
            Ok::<_, SessionError>(GameSnapshot::capture(key, session, computer_move))
        })
        .await??;
    Ok(Json(snapshot))
}

#[instrument(skip_all)]
pub(super) async fn new_game(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let Path(id) = path?;
    let key = id.clone();
    let snapshot = state
        .sessions
        .with_session(&id, move |session| {
            session.new_game();
            GameSnapshot::capture(key, session, None)
        })
        .await?;
    Ok(Json(snapshot))
}

#[instrument(skip_all)]
pub(super) async fn reset_scores(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let Path(id) = path?;
    let key = id.clone();
    let snapshot = state
        .sessions
        .with_session(&id, move |session| {
            session.reset_scores();
            GameSnapshot::capture(key, session, None)
        })
        .await?;
    Ok(Json(snapshot))
}

/// Switches the mode and starts a new game, keeping the scores.
#[instrument(skip_all)]
pub(super) async fn set_mode(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<ModeRequest>, JsonRejection>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let Path(id) = path?;
    let Json(request) = body?;
    let key = id.clone();
    let snapshot = state
        .sessions
        .with_session(&id, move |session| {
            session.set_mode(request.mode);
            GameSnapshot::capture(key, session, None)
        })
        .await?;
    Ok(Json(snapshot))
}
