//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]: evaluation and validated move
//! application. Turn order is not tracked here; see [`crate::GameState`].

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use crate::{Board, GameResult, Mark, MoveError, Position};
use tracing::{debug, instrument, warn};

/// Evaluates a board: win first, then tie, otherwise in progress.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> GameResult {
    if let Some((mark, line)) = check_winner(board) {
        GameResult::Win { mark, line }
    } else if is_full(board) {
        GameResult::Tie
    } else {
        GameResult::InProgress
    }
}

/// Places `mark` at `index`, returning the new board.
///
/// Rejects moves on a finished board, indices past 8, and occupied squares.
/// The input board is never modified.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, MoveError> {
    if evaluate(board).is_terminal() {
        warn!(index, %mark, "Move attempted on a finished board");
        return Err(MoveError::GameOver);
    }

    let pos = Position::from_index(index).ok_or_else(|| {
        warn!(index, "Move index out of range");
        MoveError::OutOfRange(index)
    })?;

    if !board.is_empty(pos) {
        warn!(%pos, "Square already occupied");
        return Err(MoveError::SquareOccupied(pos));
    }

    debug!(%pos, %mark, "Move applied");
    Ok(board.with_mark(pos, mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_reports_each_result() {
        assert_eq!(evaluate(&Board::new()), GameResult::InProgress);
        assert_eq!(
            evaluate(&Board::from_cells("X.O XO. X..").unwrap()),
            GameResult::Win {
                mark: Mark::X,
                line: [0, 3, 6]
            }
        );
        assert_eq!(evaluate(&Board::from_cells("XOX OXX OXO").unwrap()), GameResult::Tie);
    }

    #[test]
    fn apply_move_changes_exactly_one_cell() {
        let board = Board::from_cells("X.. .O. ...").unwrap();
        let next = apply_move(&board, 8, Mark::X).unwrap();
        let changed = board
            .squares()
            .iter()
            .zip(next.squares())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 1);
        assert_eq!(next.get(Position::BottomRight).mark(), Some(Mark::X));
    }

    #[test]
    fn apply_move_rejects_occupied_square() {
        let board = Board::from_cells("X.. .O. ...").unwrap();
        let before = board;
        assert_eq!(
            apply_move(&board, 4, Mark::X),
            Err(MoveError::SquareOccupied(Position::Center))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn apply_move_rejects_out_of_range() {
        assert_eq!(
            apply_move(&Board::new(), 9, Mark::X),
            Err(MoveError::OutOfRange(9))
        );
    }

    #[test]
    fn apply_move_rejects_finished_board() {
        let won = Board::from_cells("XXX OO. ...").unwrap();
        assert_eq!(apply_move(&won, 8, Mark::O), Err(MoveError::GameOver));
    }
}
