//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark};

/// The 8 canonical lines: rows, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark and the first canonical line it completes, or `None`.
pub fn check_winner(board: &Board) -> Option<(Mark, [usize; 3])> {
    let squares = board.squares();
    LINES.iter().find_map(|line| {
        let [a, b, c] = *line;
        let mark = squares[a].mark()?;
        (squares[b].mark() == Some(mark) && squares[c].mark() == Some(mark)).then_some((mark, *line))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::from_cells("XXX OO. ...").unwrap();
        assert_eq!(check_winner(&board), Some((Mark::X, [0, 1, 2])));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::from_cells("XXO XO. O..").unwrap();
        assert_eq!(check_winner(&board), Some((Mark::O, [2, 4, 6])));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::from_cells("XX. ... ...").unwrap();
        assert_eq!(check_winner(&board), None);
    }
}
