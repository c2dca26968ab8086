//! Play sessions: game mode, current game and score tally.

use crate::{GameResult, GameState, Mark, MoveError, SearchError, search};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who controls the O side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameMode {
    /// Two people share the board.
    #[default]
    HumanVsHuman,
    /// The human plays X, the computer plays O.
    HumanVsComputer,
}

/// Wins per mark and ties across games in one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Games won by X.
    pub x: u32,
    /// Games won by O.
    pub o: u32,
    /// Tied games.
    pub ties: u32,
}

impl Scoreboard {
    /// Tallies a terminal result. In-progress results are ignored.
    pub fn record(&mut self, result: &GameResult) {
        match result {
            GameResult::Win { mark: Mark::X, .. } => self.x += 1,
            GameResult::Win { mark: Mark::O, .. } => self.o += 1,
            GameResult::Tie => self.ties += 1,
            GameResult::InProgress => {}
        }
    }

    /// Total games tallied.
    pub fn games(&self) -> u32 {
        self.x + self.o + self.ties
    }
}

/// Error from a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The move was rejected by the rules.
    #[display("Invalid move: {}", _0)]
    Move(MoveError),
    /// The search could not run.
    #[display("Search failed: {}", _0)]
    Search(SearchError),
    /// The computer was asked to move out of turn.
    #[display("It's not the computer's turn")]
    NotComputersTurn,
}

impl std::error::Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

impl From<SearchError> for SessionError {
    fn from(err: SearchError) -> Self {
        Self::Search(err)
    }
}

/// One player's session: mode, current game and running score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    mode: GameMode,
    game: GameState,
    scores: Scoreboard,
}

impl Session {
    /// The mark the computer plays in [`GameMode::HumanVsComputer`].
    pub const COMPUTER: Mark = Mark::O;

    /// Creates a session with a fresh game and zero scores.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        info!(%mode, "Creating session");
        Self {
            mode,
            game: GameState::new(),
            scores: Scoreboard::default(),
        }
    }

    /// Returns the game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the current game.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Returns the score tally.
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// True while the computer owes a move.
    pub fn awaiting_computer(&self) -> bool {
        self.mode == GameMode::HumanVsComputer
            && !self.game.is_over()
            && self.game.next() == Self::COMPUTER
    }

    /// Plays a human move at `index` for the mark due to move.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn play(&mut self, index: usize) -> Result<&GameState, SessionError> {
        if self.awaiting_computer() {
            warn!(index, "Human move while the computer is to move");
            return Err(MoveError::NotYourTurn(Self::COMPUTER).into());
        }
        let game = self.game.play(index)?;
        self.advance(game);
        Ok(&self.game)
    }

    /// Lets the computer choose and play its move, returning the cell index.
    #[instrument(skip(self))]
    pub fn computer_move(&mut self) -> Result<usize, SessionError> {
        if !self.awaiting_computer() {
            debug!("Computer move requested out of turn");
            return Err(SessionError::NotComputersTurn);
        }
        let index = search::best_move(self.game.board(), Self::COMPUTER)?;
        let game = self.game.play(index)?;
        self.advance(game);
        info!(index, "Computer moved");
        Ok(index)
    }

    /// Starts a new game, keeping the scores.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        debug!("Starting new game");
        self.game = GameState::new();
    }

    /// Zeroes the scores and starts a new game.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        info!(previous = ?self.scores, "Resetting scores");
        self.scores = Scoreboard::default();
        self.new_game();
    }

    /// Switches the mode and starts a new game. Scores are kept.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) {
        info!(from = %self.mode, to = %mode, "Switching game mode");
        self.mode = mode;
        self.new_game();
    }

    /// Installs the next state, tallying the result the moment it turns terminal.
    fn advance(&mut self, game: GameState) {
        let finished_now = !self.game.is_over() && game.is_over();
        self.game = game;
        if finished_now {
            self.scores.record(&self.game.result());
            info!(scores = ?self.scores, "Score updated");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_increment_once_per_finished_game() {
        let mut session = Session::new(GameMode::HumanVsHuman);
        for index in [0, 3, 1, 4, 2] {
            session.play(index).unwrap();
        }
        assert_eq!(session.scores(), Scoreboard { x: 1, o: 0, ties: 0 });

        // Further moves are rejected and do not touch the tally.
        assert!(session.play(8).is_err());
        assert_eq!(session.scores().games(), 1);
    }

    #[test]
    fn human_cannot_move_for_the_computer() {
        let mut session = Session::new(GameMode::HumanVsComputer);
        session.play(4).unwrap();
        assert!(session.awaiting_computer());
        assert_eq!(
            session.play(0),
            Err(SessionError::Move(MoveError::NotYourTurn(Mark::O)))
        );
    }

    #[test]
    fn computer_moves_only_on_its_turn() {
        let mut session = Session::new(GameMode::HumanVsComputer);
        assert_eq!(session.computer_move(), Err(SessionError::NotComputersTurn));

        session.play(4).unwrap();
        let index = session.computer_move().unwrap();
        assert_eq!(session.game().board().squares()[index].mark(), Some(Mark::O));
        assert!(!session.awaiting_computer());
    }

    #[test]
    fn human_vs_human_never_awaits_computer() {
        let mut session = Session::new(GameMode::HumanVsHuman);
        session.play(4).unwrap();
        assert!(!session.awaiting_computer());
        session.play(0).unwrap();
        assert_eq!(session.game().history().len(), 2);
    }

    #[test]
    fn reset_scores_clears_tally_and_board() {
        let mut session = Session::new(GameMode::HumanVsHuman);
        for index in [0, 3, 1, 4, 2] {
            session.play(index).unwrap();
        }
        session.reset_scores();
        assert_eq!(session.scores(), Scoreboard::default());
        assert!(session.game().history().is_empty());
    }

    #[test]
    fn set_mode_starts_new_game_and_keeps_scores() {
        let mut session = Session::new(GameMode::HumanVsHuman);
        for index in [0, 3, 1, 4, 2] {
            session.play(index).unwrap();
        }
        session.set_mode(GameMode::HumanVsComputer);
        assert_eq!(session.mode(), GameMode::HumanVsComputer);
        assert_eq!(session.scores().x, 1);
        assert!(session.game().history().is_empty());
    }

    #[test]
    fn game_mode_parses_kebab_case() {
        assert_eq!(
            "human-vs-computer".parse::<GameMode>().ok(),
            Some(GameMode::HumanVsComputer)
        );
        assert_eq!(GameMode::HumanVsHuman.to_string(), "human-vs-human");
    }

    #[test]
    fn default_session_is_two_humans() {
        assert_eq!(GameMode::default(), GameMode::HumanVsHuman);
        let session = Session::default();
        assert_eq!(session.mode(), GameMode::HumanVsHuman);
        assert!(!session.awaiting_computer());
    }
}
