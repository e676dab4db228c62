//! Quoridor move vocabulary and its text notation (`N`, `E`, `h37`, `v4`).

use super::walls::Orientation;
use super::QuoridorError;
use std::fmt;
use std::str::FromStr;

/// A one-cell pawn step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn token(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    /// Direction leading from `from` to the adjacent cell `to`.
    pub fn between(from: usize, to: usize, board_size: usize) -> Option<Self> {
        if to + board_size == from {
            Some(Direction::North)
        } else if from + board_size == to {
            Some(Direction::South)
        } else if from + 1 == to {
            Some(Direction::East)
        } else if to + 1 == from {
            Some(Direction::West)
        } else {
            None
        }
    }

    /// Cell reached by stepping from `from`. The step must stay on the board.
    pub fn target(self, from: usize, board_size: usize) -> usize {
        match self {
            Direction::North => from - board_size,
            Direction::South => from + board_size,
            Direction::East => from + 1,
            Direction::West => from - 1,
        }
    }
}

/// A pawn step or a wall centred on a lattice vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoridorMove {
    Step(Direction),
    Wall(Orientation, usize),
}

impl QuoridorMove {
    pub fn is_wall(&self) -> bool {
        matches!(self, QuoridorMove::Wall(..))
    }
}

impl fmt::Display for QuoridorMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoridorMove::Step(direction) => write!(f, "{}", direction.token()),
            QuoridorMove::Wall(orientation, vertex) => write!(f, "{}{}", orientation.tag(), vertex),
        }
    }
}

impl FromStr for QuoridorMove {
    type Err = QuoridorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || QuoridorError::InvalidMove(s.to_string());

        if let Some(direction) = Direction::ALL
            .iter()
            .find(|d| text.len() == 1 && text.starts_with(d.token()))
        {
            return Ok(QuoridorMove::Step(*direction));
        }

        let mut chars = text.chars();
        let orientation = match chars.next() {
            Some('h') => Orientation::Horizontal,
            Some('v') => Orientation::Vertical,
            _ => return Err(invalid()),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let vertex = digits.parse::<usize>().map_err(|_| invalid())?;
        Ok(QuoridorMove::Wall(orientation, vertex))
    }
}
