//! # Game Wrapper Module
//!
//! Lets the play loop and the search driver handle every shipped game through
//! one type. `GameWrapper` and `MoveWrapper` are plain enums, so dispatch is a
//! `match` and the wrapper is itself a [`GameState`] the engine can search.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │   MCTS Engine   │◄──►│   GameWrapper    │◄──►│ TicTacToeState   │
//! │                 │    │                  │    │ Connect4State    │
//! │                 │    │                  │    │ QuoridorState    │
//! └─────────────────┘    └──────────────────┘    └──────────────────┘
//! ```

use crate::game_controller::MoveValidationError;
use mcts::games::connect4::{Connect4Move, Connect4State};
use mcts::games::quoridor::{QuoridorMove, QuoridorState};
use mcts::games::tictactoe::{TicTacToeMove, TicTacToeState};
use mcts::GameState;
use std::fmt;

/// Wrapper enum for all supported game types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameWrapper {
    /// N-in-a-row on a square board, 3×3 by default
    TicTacToe(TicTacToeState),

    /// Gravity drop, four in a row on 7×6
    Connect4(Connect4State),

    /// Pawn race with path-preserving walls
    Quoridor(QuoridorState),
}

/// Wrapper enum for all supported move types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MoveWrapper {
    TicTacToe(TicTacToeMove),
    Connect4(Connect4Move),
    Quoridor(QuoridorMove),
}

impl fmt::Display for MoveWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveWrapper::TicTacToe(m) => write!(f, "T({})", m),
            MoveWrapper::Connect4(m) => write!(f, "C4({})", m),
            MoveWrapper::Quoridor(m) => write!(f, "Q({})", m),
        }
    }
}

impl fmt::Display for GameWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameWrapper::TicTacToe(g) => write!(f, "{}", g),
            GameWrapper::Connect4(g) => write!(f, "{}", g),
            GameWrapper::Quoridor(g) => write!(f, "{}", g),
        }
    }
}

macro_rules! impl_game_dispatch {
    ($($variant:ident),*) => {
        impl GameState for GameWrapper {
            type Move = MoveWrapper;

            fn get_possible_moves(&self) -> Vec<Self::Move> {
                match self {
                    $(GameWrapper::$variant(g) => g
                        .get_possible_moves()
                        .into_iter()
                        .map(MoveWrapper::$variant)
                        .collect(),)*
                }
            }

            fn make_move(&mut self, mv: &Self::Move) {
                match (self, mv) {
                    $((GameWrapper::$variant(g), MoveWrapper::$variant(m)) => g.make_move(m),)*
                    (game, mv) => panic!("Mismatched game and move types: {} on {}", mv, game.name()),
                }
            }

            fn get_winner(&self) -> Option<u8> {
                match self {
                    $(GameWrapper::$variant(g) => g.get_winner(),)*
                }
            }

            fn get_current_player(&self) -> u8 {
                match self {
                    $(GameWrapper::$variant(g) => g.get_current_player(),)*
                }
            }

            fn is_legal(&self, mv: &Self::Move) -> bool {
                match (self, mv) {
                    $((GameWrapper::$variant(g), MoveWrapper::$variant(m)) => g.is_legal(m),)*
                    _ => false,
                }
            }
        }

        impl GameWrapper {
            /// Parses a move typed in the game's own notation.
            pub fn parse_move(&self, text: &str) -> Result<MoveWrapper, MoveValidationError> {
                match self {
                    $(GameWrapper::$variant(g) => Ok(MoveWrapper::$variant(g.parse_move(text)?)),)*
                }
            }
        }
    };
}

impl_game_dispatch!(TicTacToe, Connect4, Quoridor);

impl GameWrapper {
    pub fn name(&self) -> &'static str {
        match self {
            GameWrapper::TicTacToe(_) => "Tic-Tac-Toe",
            GameWrapper::Connect4(_) => "Connect 4",
            GameWrapper::Quoridor(_) => "Quoridor",
        }
    }

    /// One-line reminder of the move notation for prompts.
    pub fn move_hint(&self) -> &'static str {
        match self {
            GameWrapper::TicTacToe(_) => "cell index, row-major from 0",
            GameWrapper::Connect4(_) => "column index from 0",
            GameWrapper::Quoridor(_) => "N/S/E/W to step, h<vertex>/v<vertex> for a wall",
        }
    }

    /// Human-readable player name
    pub fn player_name(&self, player: u8) -> String {
        let name = match (self, player) {
            (GameWrapper::TicTacToe(_), 1) => "X",
            (GameWrapper::TicTacToe(_), _) => "O",
            (GameWrapper::Connect4(_), 1) => "Red",
            (GameWrapper::Connect4(_), _) => "Yellow",
            (GameWrapper::Quoridor(_), _) => return format!("Player {}", player),
        };
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let move_wrapper = MoveWrapper::Connect4(Connect4Move(3));
        assert_eq!(format!("{}", move_wrapper), "C4(3)");

        let game = GameWrapper::Quoridor(QuoridorState::new());
        assert_eq!(game.parse_move("h37").unwrap().to_string(), "Q(h37)");
    }

    #[test]
    fn test_dispatch_matches_inner_game() {
        let inner = TicTacToeState::new();
        let game = GameWrapper::TicTacToe(inner.clone());
        assert_eq!(game.get_possible_moves().len(), inner.get_possible_moves().len());
        assert_eq!(game.get_current_player(), 1);
        assert_eq!(game.get_winner(), None);
    }

    #[test]
    fn test_is_legal_rejects_foreign_moves() {
        let game = GameWrapper::Connect4(Connect4State::default());
        assert!(game.is_legal(&MoveWrapper::Connect4(Connect4Move(0))));
        assert!(!game.is_legal(&MoveWrapper::TicTacToe(TicTacToeMove(0))));
    }

    #[test]
    #[should_panic(expected = "Mismatched game and move types")]
    fn test_mismatched_move_panics() {
        let mut game = GameWrapper::TicTacToe(TicTacToeState::new());
        game.make_move(&MoveWrapper::Connect4(Connect4Move(0)));
    }

    #[test]
    fn test_parse_move_errors() {
        let game = GameWrapper::TicTacToe(TicTacToeState::new());
        assert!(matches!(game.parse_move("x"), Err(MoveValidationError::Game(_))));
        let game = GameWrapper::Quoridor(QuoridorState::new());
        assert!(matches!(game.parse_move("z9"), Err(MoveValidationError::Quoridor(_))));
    }
}
