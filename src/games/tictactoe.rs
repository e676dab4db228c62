//! # Tic-tac-toe
//!
//! N-in-a-row on a square board. The defaults (3×3, three in a row) give
//! the classic game. A filled board without a line is a draw.

use crate::error::GameError;
use crate::{opponent, GameState, DRAW};
use std::fmt;
use std::str::FromStr;

/// A move is the index of the cell to fill, row-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeMove(pub usize);

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicTacToeMove {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map(TicTacToeMove)
            .map_err(|_| GameError::InvalidMove(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeState {
    board: Vec<u8>,
    current_player: u8,
    winner: Option<u8>,
    board_size: usize,
    line_size: usize,
}

impl TicTacToeState {
    /// The classic 3×3 game.
    pub fn new() -> Self {
        Self::with_size(3, 3)
    }

    pub fn with_size(board_size: usize, line_size: usize) -> Self {
        TicTacToeState {
            board: vec![0; board_size * board_size],
            current_player: 1,
            winner: None,
            board_size,
            line_size,
        }
    }

    pub fn board(&self) -> &[u8] {
        &self.board
    }

    pub fn get_board_size(&self) -> usize {
        self.board_size
    }

    pub fn get_line_size(&self) -> usize {
        self.line_size
    }

    /// Parses a cell index and checks it lies on the board.
    pub fn parse_move(&self, s: &str) -> Result<TicTacToeMove, GameError> {
        let mv: TicTacToeMove = s.parse()?;
        let limit = self.board.len();
        if mv.0 >= limit {
            return Err(GameError::OutOfRange { index: mv.0, limit });
        }
        Ok(mv)
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToeState {
    type Move = TicTacToeMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        if self.winner.is_some() {
            return Vec::new();
        }
        (0..self.board.len())
            .filter(|&i| self.board[i] == 0)
            .map(TicTacToeMove)
            .collect()
    }

    fn make_move(&mut self, mv: &Self::Move) {
        assert!(self.winner.is_none(), "move {} played on a finished game", mv);
        self.board[mv.0] = self.current_player;

        let (row, col) = (mv.0 / self.board_size, mv.0 % self.board_size);
        if grid_rules::line_through(&self.board, self.board_size, self.board_size, row, col, self.line_size) {
            self.winner = Some(self.current_player);
        } else if self.board.iter().all(|&cell| cell != 0) {
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
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.board.chunks(self.board_size) {
            for cell in row {
                let symbol = match cell {
                    1 => "X",
                    2 => "O",
                    _ => "-",
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
