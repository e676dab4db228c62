//! Error types shared by the search driver and the games.
//!
//! Contract violations (moving on a finished game, corrupting the Quoridor
//! graph) are not represented here: they panic at the point of detection.
//! These enums cover the recoverable cases a caller can act on.

use thiserror::Error;

/// Errors that can occur when asking the driver for a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Cannot search from a finished game (winner: {0})")]
    TerminalState(u8),

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Search produced no root children after {0} iterations")]
    EmptyTree(u32),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Errors raised while turning user input into moves for the grid games.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid move '{0}'")]
    InvalidMove(String),

    #[error("Move {index} is out of range (expected 0..{limit})")]
    OutOfRange { index: usize, limit: usize },
}

/// Errors from the Quoridor engine's recoverable entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoridorError {
    #[error("Invalid move '{0}'")]
    InvalidMove(String),

    #[error("Board size must be odd and at least 3 (got {0})")]
    InvalidBoardSize(usize),

    #[error("No player wall at vertex {0}")]
    NoWallAt(usize),
}
