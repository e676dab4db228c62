//! # Connect 4 Game Implementation
//!
//! Players take turns dropping pieces into columns, trying to get 4 pieces
//! in a row (horizontally, vertically, or diagonally).
//!
//! ## Rules
//! - Players alternate dropping pieces into columns
//! - Pieces fall to the lowest available spot in the column due to gravity
//! - First player to get 4 pieces in a row wins
//! - Game is a draw if the board fills up with no winner

use crate::error::GameError;
use crate::{opponent, GameState, DRAW};
use std::fmt;
use std::str::FromStr;

/// Represents a move in Connect 4
///
/// Contains the column number where a player wants to drop their piece.
/// Column numbers are 0-based indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Connect4Move(pub usize);

impl fmt::Display for Connect4Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents the complete state of a Connect 4 game
///
/// The board uses 1 for player 1 pieces, 2 for player 2 pieces, and 0 for empty spaces.
/// Row 0 is the top of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect4State {
    /// The game board as a flat vector (row-major)
    board: Vec<u8>,
    /// Current player (1 or 2)
    current_player: u8,
    /// Winner once the game is over, `Some(DRAW)` for a full board
    winner: Option<u8>,
    /// Board width (number of columns)
    width: usize,
    /// Board height (number of rows)
    height: usize,
    /// Number of pieces needed in a row to win
    line_size: usize,
    /// Last move made, if any (row, column)
    last_move: Option<(usize, usize)>,
}

impl fmt::Display for Connect4State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for c in 0..self.width {
                let symbol = match self.board[r * self.width + c] {
                    1 => "x",
                    2 => "o",
                    _ => "-",
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for Connect4State {
    type Move = Connect4Move; // Column to drop a piece

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        if self.winner.is_some() {
            return Vec::new();
        }
        (0..self.width)
            .filter(|&c| self.board[c] == 0)
            .map(Connect4Move)
            .collect()
    }

    fn make_move(&mut self, mv: &Self::Move) {
        assert!(self.winner.is_none(), "column {} played on a finished game", mv);
        let Some(r) = (0..self.height).rev().find(|&r| self.board[r * self.width + mv.0] == 0) else {
            panic!("column {} is full", mv);
        };
        self.board[r * self.width + mv.0] = self.current_player;
        self.last_move = Some((r, mv.0));

        if grid_rules::line_through(&self.board, self.width, self.height, r, mv.0, self.line_size) {
            self.winner = Some(self.current_player);
        } else if self.board[..self.width].iter().all(|&cell| cell != 0) {
            self.winner = Some(DRAW);
        }
        self.current_player = opponent(self.current_player);
    }

    fn get_winner(&self) -> Option<u8> {
        self.winner
    }

    fn get_current_player(&self) -> u8 {
        self.current_player
    }

    fn is_legal(&self, mv: &Connect4Move) -> bool {
        self.winner.is_none() && mv.0 < self.width && self.board[mv.0] == 0
    }
}

impl Connect4State {
    /// Creates a new Connect 4 game with the specified configuration
    pub fn new(width: usize, height: usize, line_size: usize) -> Self {
        Self {
            board: vec![0; width * height],
            current_player: 1,
            winner: None,
            width,
            height,
            line_size,
            last_move: None,
        }
    }

    /// Gets the number of pieces needed in a row to win
    pub fn get_line_size(&self) -> usize {
        self.line_size
    }

    pub fn get_width(&self) -> usize {
        self.width
    }

    /// Piece at `(row, col)`, row 0 being the top.
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.board[row * self.width + col]
    }

    pub fn get_last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    /// Parses a column number and checks it lies on the board.
    pub fn parse_move(&self, s: &str) -> Result<Connect4Move, GameError> {
        let column = s
            .trim()
            .parse::<usize>()
            .map_err(|_| GameError::InvalidMove(s.to_string()))?;
        if column >= self.width {
            return Err(GameError::OutOfRange { index: column, limit: self.width });
        }
        Ok(Connect4Move(column))
    }
}

impl Default for Connect4State {
    fn default() -> Self {
        Self::new(7, 6, 4)
    }
}

impl FromStr for Connect4Move {
    type Err = GameError;

    /// Creates a Connect4Move from a string representation
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use mcts::games::connect4::Connect4Move;
    /// let mv = Connect4Move::from_str("3").unwrap();
    /// assert_eq!(mv.0, 3);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s
            .trim()
            .parse::<usize>()
            .map_err(|_| GameError::InvalidMove(s.to_string()))?;
        Ok(Connect4Move(c))
    }
}
