//! Board evaluation results and the whole-game phase.

use crate::Mark;
use serde::{Deserialize, Serialize};

/// Result of evaluating a board.
///
/// Always derived from a board, never stored apart from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// No line is complete and empty squares remain.
    InProgress,
    /// `mark` holds the canonical line `line` (cell indices, ascending).
    Win {
        /// The winning mark.
        mark: Mark,
        /// Indices of the winning line.
        line: [usize; 3],
    },
    /// All squares are occupied and no line is complete.
    Tie,
}

impl GameResult {
    /// Returns true for a win or a tie.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameResult::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        match self {
            GameResult::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "In progress"),
            GameResult::Win { mark, .. } => write!(f, "Player {} wins", mark),
            GameResult::Tie => write!(f, "Tie"),
        }
    }
}

/// Phase of a whole game.
///
/// `Empty` moves to `InProgress` on the first move. `Won` and `Tied` are
/// terminal until a new game is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "mark", rename_all = "snake_case")]
pub enum Phase {
    /// No move has been played yet.
    Empty,
    /// At least one move played, no terminal result.
    InProgress,
    /// A mark completed a line.
    Won(Mark),
    /// The board filled with no line.
    Tied,
}

impl Phase {
    /// Returns true for `Won` and `Tied`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Won(_) | Phase::Tied)
    }
}
