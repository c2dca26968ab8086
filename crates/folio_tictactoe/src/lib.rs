//! Tic-tac-toe engine with an unbeatable computer opponent.
//!
//! # Architecture
//!
//! - **Board**: a `Copy` 3x3 grid; placing a mark returns a new board
//! - **Rules**: pure evaluation and validated move application
//! - **Search**: exhaustive minimax choosing the computer's move
//! - **GameState**: turn-tracking wrapper so callers never pass a mark
//! - **Session**: mode, current game and score tally for one player
//!
//! # Example
//!
//! ```
//! use folio_tictactoe::{GameMode, Session};
//!
//! let mut session = Session::new(GameMode::HumanVsComputer);
//! session.play(4)?;
//! let reply = session.computer_move()?;
//! assert_ne!(reply, 4);
//! # Ok::<(), folio_tictactoe::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod phases;
mod position;
mod session;
mod types;

pub mod rules;
pub mod search;

pub use action::{Move, MoveError};
pub use game::GameState;
pub use phases::{GameResult, Phase};
pub use position::Position;
pub use search::{SearchError, best_move};
pub use session::{GameMode, Scoreboard, Session, SessionError};
pub use types::{Board, Mark, Square};
