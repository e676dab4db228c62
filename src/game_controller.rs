//! # Game Controller Module
//!
//! `GameController` owns the authoritative game state for a play session.
//! Human input is validated here before it touches the state; moves chosen
//! by the search engine are trusted and applied directly. The engine only
//! ever sees clones handed out by [`GameController::get_state_for_search`].

use crate::game_wrapper::{GameWrapper, MoveWrapper};
use mcts::{GameError, GameState, QuoridorError, DRAW};
use thiserror::Error;

/// Result of attempting to apply a move
#[derive(Debug, Clone, PartialEq)]
pub enum MoveResult {
    /// Move was successfully applied
    Success {
        move_made: MoveWrapper,
        /// Player who made the move
        player: u8,
        game_over: bool,
        /// `Some(DRAW)` for a draw
        winner: Option<u8>,
    },
    /// Move was rejected as invalid
    Invalid { reason: MoveValidationError },
    /// Game is already over, no more moves allowed
    GameOver,
}

/// Why a move typed by a player was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveValidationError {
    #[error("Illegal move")]
    IllegalMove,

    #[error("Move type doesn't match game")]
    MismatchedGameType,

    #[error("Game is already over")]
    GameAlreadyOver,

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Quoridor(#[from] QuoridorError),
}

/// A single entry in the move history
#[derive(Debug, Clone, PartialEq)]
pub struct MoveHistoryEntry {
    pub player: u8,
    pub move_made: MoveWrapper,
    /// Move number (1-indexed)
    pub move_number: usize,
}

/// Current game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Win(u8),
    Draw,
}

impl GameStatus {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    fn from_winner(winner: Option<u8>) -> Self {
        match winner {
            None => GameStatus::InProgress,
            Some(DRAW) => GameStatus::Draw,
            Some(player) => GameStatus::Win(player),
        }
    }
}

/// The central game controller that owns the authoritative game state
#[derive(Debug, Clone)]
pub struct GameController {
    game_state: GameWrapper,
    move_history: Vec<MoveHistoryEntry>,
    status: GameStatus,
}

impl GameController {
    pub fn new(initial_state: GameWrapper) -> Self {
        let status = GameStatus::from_winner(initial_state.get_winner());
        Self {
            game_state: initial_state,
            move_history: Vec::new(),
            status,
        }
    }

    /// Validate a move without applying it
    pub fn validate_move(&self, mv: &MoveWrapper) -> Result<(), MoveValidationError> {
        if self.status.is_game_over() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if !self.matches_game(mv) {
            return Err(MoveValidationError::MismatchedGameType);
        }
        if !self.game_state.is_legal(mv) {
            return Err(MoveValidationError::IllegalMove);
        }
        Ok(())
    }

    /// Validates the move and applies it if valid.
    pub fn try_make_move(&mut self, mv: MoveWrapper) -> MoveResult {
        if let Err(reason) = self.validate_move(&mv) {
            return MoveResult::Invalid { reason };
        }
        self.apply(mv)
    }

    /// Parses text in the current game's notation and plays it.
    pub fn try_make_move_str(&mut self, text: &str) -> MoveResult {
        match self.game_state.parse_move(text) {
            Ok(mv) => self.try_make_move(mv),
            Err(reason) => MoveResult::Invalid { reason },
        }
    }

    /// Applies a move produced by the search engine without revalidating it.
    pub fn apply_trusted_move(&mut self, mv: MoveWrapper) -> MoveResult {
        if self.status.is_game_over() {
            return MoveResult::GameOver;
        }
        self.apply(mv)
    }

    fn apply(&mut self, mv: MoveWrapper) -> MoveResult {
        let player = self.game_state.get_current_player();
        let move_number = self.move_history.len() + 1;

        self.game_state.make_move(&mv);
        self.move_history.push(MoveHistoryEntry {
            player,
            move_made: mv.clone(),
            move_number,
        });

        let winner = self.game_state.get_winner();
        self.status = GameStatus::from_winner(winner);

        MoveResult::Success {
            move_made: mv,
            player,
            game_over: self.status.is_game_over(),
            winner,
        }
    }

    fn matches_game(&self, mv: &MoveWrapper) -> bool {
        matches!(
            (&self.game_state, mv),
            (GameWrapper::TicTacToe(_), MoveWrapper::TicTacToe(_))
                | (GameWrapper::Connect4(_), MoveWrapper::Connect4(_))
                | (GameWrapper::Quoridor(_), MoveWrapper::Quoridor(_))
        )
    }

    /// A copy the search engine can mutate freely.
    pub fn get_state_for_search(&self) -> GameWrapper {
        self.game_state.clone()
    }

    pub fn get_render_state(&self) -> &GameWrapper {
        &self.game_state
    }

    pub fn get_current_player(&self) -> u8 {
        self.game_state.get_current_player()
    }

    pub fn get_status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// Move list and result as plain text, one move per line.
    pub fn format_history(&self) -> String {
        if self.move_history.is_empty() {
            return String::from("No moves made yet.");
        }

        let mut output = format!("=== {} Game History ===\n\n", self.game_state.name());
        for entry in &self.move_history {
            output.push_str(&format!(
                "{}. {} - {}\n",
                entry.move_number,
                self.game_state.player_name(entry.player),
                entry.move_made
            ));
        }

        match self.status {
            GameStatus::Win(winner) => {
                output.push_str(&format!("\nResult: {} wins!\n", self.game_state.player_name(winner)));
            }
            GameStatus::Draw => output.push_str("\nResult: Draw\n"),
            GameStatus::InProgress => {
                output.push_str(&format!(
                    "\n(Game in progress - {} to move)\n",
                    self.game_state.player_name(self.get_current_player())
                ));
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcts::games::connect4::Connect4Move;
    use mcts::games::quoridor::QuoridorState;
    use mcts::games::tictactoe::{TicTacToeMove, TicTacToeState};

    fn tictactoe() -> GameController {
        GameController::new(GameWrapper::TicTacToe(TicTacToeState::new()))
    }

    #[test]
    fn test_valid_move() {
        let mut controller = tictactoe();
        match controller.try_make_move(MoveWrapper::TicTacToe(TicTacToeMove(4))) {
            MoveResult::Success { player, game_over, .. } => {
                assert_eq!(player, 1);
                assert!(!game_over);
            }
            other => panic!("Expected successful move, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_move_occupied() {
        let mut controller = tictactoe();
        controller.try_make_move(MoveWrapper::TicTacToe(TicTacToeMove(4)));
        assert_eq!(
            controller.try_make_move(MoveWrapper::TicTacToe(TicTacToeMove(4))),
            MoveResult::Invalid { reason: MoveValidationError::IllegalMove }
        );
    }

    #[test]
    fn test_mismatched_move_is_rejected() {
        let mut controller = tictactoe();
        assert_eq!(
            controller.try_make_move(MoveWrapper::Connect4(Connect4Move(0))),
            MoveResult::Invalid { reason: MoveValidationError::MismatchedGameType }
        );
    }

    #[test]
    fn test_text_moves() {
        let mut controller = GameController::new(GameWrapper::Quoridor(QuoridorState::new()));
        assert!(matches!(controller.try_make_move_str("N"), MoveResult::Success { player: 1, .. }));
        assert!(matches!(controller.try_make_move_str("h41"), MoveResult::Success { player: 2, .. }));
        assert!(matches!(
            controller.try_make_move_str("h41"),
            MoveResult::Invalid { reason: MoveValidationError::IllegalMove }
        ));
        assert!(matches!(
            controller.try_make_move_str("jump"),
            MoveResult::Invalid { reason: MoveValidationError::Quoridor(QuoridorError::InvalidMove(_)) }
        ));
    }

    #[test]
    fn test_draw_and_game_over() {
        let mut controller = tictactoe();
        for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            controller.apply_trusted_move(MoveWrapper::TicTacToe(TicTacToeMove(cell)));
        }
        assert_eq!(controller.get_status(), GameStatus::Draw);
        assert_eq!(
            controller.apply_trusted_move(MoveWrapper::TicTacToe(TicTacToeMove(0))),
            MoveResult::GameOver
        );
        assert!(controller.format_history().contains("Result: Draw"));
    }

    #[test]
    fn test_move_history() {
        let mut controller = tictactoe();
        controller.try_make_move_str("0");
        controller.try_make_move_str("4");
        controller.try_make_move_str("1");
        controller.try_make_move_str("5");
        controller.try_make_move_str("2");

        assert_eq!(controller.move_count(), 5);
        assert_eq!(controller.get_status(), GameStatus::Win(1));

        let history = controller.format_history();
        assert!(history.contains("Tic-Tac-Toe Game History"));
        assert!(history.contains("1. X - T(0)"));
        assert!(history.contains("2. O - T(4)"));
        assert!(history.contains("5. X - T(2)"));
        assert!(history.contains("Result: X wins!"));
    }
}
