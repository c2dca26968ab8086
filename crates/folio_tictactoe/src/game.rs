//! Turn-tracking game state.
//!
//! [`GameState`] bundles the board, the mark due to move and the current
//! result into one immutable value. Moves take no mark argument: the mark is
//! always the one whose turn it is, so double moves cannot happen.

use crate::{Board, GameResult, Mark, Move, MoveError, Phase, Position, rules};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    next: Mark,
    result: GameResult,
    history: Vec<Move>,
}

impl GameState {
    /// Creates a new game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            next: Mark::X,
            result: GameResult::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark due to move.
    ///
    /// On a finished game this is the mark that would have moved next.
    pub fn next(&self) -> Mark {
        self.next
    }

    /// Returns the result of the current board.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the phase of the game.
    pub fn phase(&self) -> Phase {
        match self.result {
            GameResult::Win { mark, .. } => Phase::Won(mark),
            GameResult::Tie => Phase::Tied,
            GameResult::InProgress if self.history.is_empty() => Phase::Empty,
            GameResult::InProgress => Phase::InProgress,
        }
    }

    /// Returns true once the game is won or tied.
    pub fn is_over(&self) -> bool {
        self.result.is_terminal()
    }

    /// Plays the next mark at `index`, returning the new state.
    #[instrument(skip(self), fields(next = %self.next))]
    pub fn play(&self, index: usize) -> Result<GameState, MoveError> {
        let board = rules::apply_move(&self.board, index, self.next)?;
        let position = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;

        let mut history = self.history.clone();
        history.push(Move::new(self.next, position));

        let result = rules::evaluate(&board);
        if result.is_terminal() {
            info!(%result, moves = history.len(), "Game finished");
        }

        Ok(GameState {
            board,
            next: self.next.opponent(),
            result,
            history,
        })
    }

    /// Rebuilds a game from a sequence of cell indices, X first.
    #[instrument]
    pub fn replay(indices: &[usize]) -> Result<GameState, MoveError> {
        indices
            .iter()
            .try_fold(GameState::new(), |game, &index| game.play(index))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
