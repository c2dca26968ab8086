//! Exhaustive minimax search for the computer-controlled mark.
//!
//! The 3x3 tree is small enough to search to the end on every call, so there
//! is no pruning, no transposition table and no depth limit. Terminal boards
//! score `+1` for a computer win, `-1` for a human win and `0` for a tie,
//! with no preference for faster wins.

use crate::{Board, GameResult, Mark, rules};
use tracing::{debug, instrument, warn};

/// Score of a board the computer has won.
pub const WIN_SCORE: i8 = 1;
/// Score of a board the human has won.
pub const LOSS_SCORE: i8 = -1;
/// Score of a tied board.
pub const TIE_SCORE: i8 = 0;

/// Error returned when the search has nothing to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// The board is already won or full.
    #[display("No legal move: the game is already over")]
    NoLegalMove,
}

impl std::error::Error for SearchError {}

/// Chooses the optimal cell index for `computer` to play on `board`.
///
/// The human side is `computer.opponent()`. Empty cells are scanned in index
/// order and only a strictly better score replaces the current choice, so
/// equally good moves resolve to the lowest index.
#[instrument(skip(board), fields(placed = board.marks_placed()))]
pub fn best_move(board: &Board, computer: Mark) -> Result<usize, SearchError> {
    if rules::evaluate(board).is_terminal() {
        warn!("Search requested on a finished board");
        return Err(SearchError::NoLegalMove);
    }

    let mut best: Option<(usize, i8)> = None;
    for pos in board.empty_positions() {
        let child = board.with_mark(pos, computer);
        let score = minimax_score(&child, computer, computer.opponent());
        debug!(index = pos.to_index(), score, "Scored candidate move");
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos.to_index(), score));
        }
    }

    let (index, score) = best.ok_or(SearchError::NoLegalMove)?;
    debug!(index, score, "Best move selected");
    Ok(index)
}

/// Minimax value of `board` from the computer's point of view, with
/// `to_move` placing the next mark.
pub fn minimax_score(board: &Board, computer: Mark, to_move: Mark) -> i8 {
    match rules::evaluate(board) {
        GameResult::Win { mark, .. } if mark == computer => WIN_SCORE,
        GameResult::Win { .. } => LOSS_SCORE,
        GameResult::Tie => TIE_SCORE,
        GameResult::InProgress => {
            let scores = board.empty_positions().map(|pos| {
                minimax_score(&board.with_mark(pos, to_move), computer, to_move.opponent())
            });
            let value = if to_move == computer {
                scores.max()
            } else {
                scores.min()
            };
            // InProgress guarantees at least one empty square.
            value.unwrap_or(TIE_SCORE)
        }
    }
}
