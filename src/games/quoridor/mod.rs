//! # Quoridor
//!
//! Two pawns race to the opposite side of an odd-sized board while each
//! player spends a fixed budget of two-cell walls to slow the other down.
//! Player 1 starts in the middle of the bottom row and wins on reaching row
//! 0; player 2 starts in the middle of the top row and wins on reaching the
//! bottom row. There are no draws.
//!
//! The state keeps an adjacency graph of the cells ([`CellGraph`]) in step
//! with the walls on the board. Pawn moves are read straight off the graph,
//! and a wall is only offered if both pawns can still reach their goal row
//! once it is in place. That check is skipped for a wall that touches no
//! other wall and no rim, since it cannot close a region. Pawns do not jump
//! and may share a cell.

pub mod graph;
pub mod moves;
pub mod paths;
pub mod walls;

pub use crate::error::QuoridorError;
pub use graph::{CellGraph, VisitOrder, WallProbe};
pub use moves::{Direction, QuoridorMove};
pub use walls::{Lattice, Orientation, WallFlags};

use crate::{opponent, GameState};
use std::fmt;

pub const DEFAULT_BOARD_SIZE: usize = 9;
pub const DEFAULT_WALLS: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoridorState {
    lattice: Lattice,
    /// Flags per lattice vertex, rim included
    walls: Vec<WallFlags>,
    /// Vertices a player wall may be centred on
    non_rim_walls: Vec<usize>,
    player_positions: [usize; 2],
    num_player_walls: [u8; 2],
    current_player: u8,
    winner: Option<u8>,
    cell_graph: CellGraph,
}

impl QuoridorState {
    /// The standard 9×9 game with 10 walls each.
    pub fn new() -> Self {
        Self::build(DEFAULT_BOARD_SIZE, DEFAULT_WALLS)
    }

    /// A game on a `board_size`×`board_size` board. The size must be odd so
    /// both pawns start on the centre column.
    pub fn with_config(board_size: usize, walls_per_player: u8) -> Result<Self, QuoridorError> {
        if board_size < 3 || board_size % 2 == 0 {
            return Err(QuoridorError::InvalidBoardSize(board_size));
        }
        Ok(Self::build(board_size, walls_per_player))
    }

    fn build(board_size: usize, walls_per_player: u8) -> Self {
        let lattice = Lattice::new(board_size);
        let centre = board_size / 2;
        QuoridorState {
            lattice,
            walls: lattice.rim_walls(),
            non_rim_walls: lattice.non_rim_vertices(),
            player_positions: [(board_size - 1) * board_size + centre, centre],
            num_player_walls: [walls_per_player; 2],
            current_player: 1,
            winner: None,
            cell_graph: CellGraph::new(board_size),
        }
    }

    pub fn board_size(&self) -> usize {
        self.lattice.board_size()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn cell_graph(&self) -> &CellGraph {
        &self.cell_graph
    }

    pub fn walls(&self) -> &[WallFlags] {
        &self.walls
    }

    /// Cell occupied by `player` (1 or 2).
    pub fn player_position(&self, player: u8) -> usize {
        self.player_positions[usize::from(player - 1)]
    }

    /// Walls `player` still has in hand.
    pub fn walls_remaining(&self, player: u8) -> u8 {
        self.num_player_walls[usize::from(player - 1)]
    }

    /// On-board cells touching lattice vertex `vertex`.
    pub fn vertex_cells(&self, vertex: usize) -> Vec<usize> {
        self.lattice.vertex_cells(vertex)
    }

    /// Steps `player` needs to reach their goal row on the current walls.
    pub fn distance_to_goal(&self, player: u8) -> Option<usize> {
        paths::distance_to_goal(&self.cell_graph, self.player_position(player), self.cell_graph.goal(player))
    }

    /// Parses move text and checks wall vertices lie inside the rim.
    pub fn parse_move(&self, s: &str) -> Result<QuoridorMove, QuoridorError> {
        let mv: QuoridorMove = s.parse()?;
        if let QuoridorMove::Wall(_, vertex) = mv {
            if vertex >= self.walls.len() || self.lattice.is_rim(vertex) {
                return Err(QuoridorError::InvalidMove(s.to_string()));
            }
        }
        Ok(mv)
    }

    /// Whether the current player may put a wall at `vertex` right now.
    pub fn is_wall_legal(&self, vertex: usize, orientation: Orientation) -> bool {
        if self.winner.is_some()
            || self.num_player_walls[self.player_index()] == 0
            || vertex >= self.walls.len()
            || self.lattice.is_rim(vertex)
        {
            return false;
        }
        let mut scratch = None;
        self.fits(vertex, orientation) && self.keeps_paths(&mut scratch, vertex, orientation)
    }

    /// Takes back the player wall at `vertex`, returning the wall to its
    /// owner and the turn to them.
    pub fn undo_wall(&mut self, vertex: usize) -> Result<(), QuoridorError> {
        let flags = self
            .walls
            .get(vertex)
            .copied()
            .ok_or(QuoridorError::NoWallAt(vertex))?;
        let (Some(orientation), Some(placer)) = (flags.orientation(), flags.placer()) else {
            return Err(QuoridorError::NoWallAt(vertex));
        };

        for (a, b) in self.lattice.severed_pairs(vertex, orientation) {
            self.cell_graph.connect(a, b);
        }
        self.walls[vertex] = WallFlags::EMPTY;
        self.num_player_walls[usize::from(placer - 1)] += 1;
        self.current_player = placer;
        self.winner = None;
        Ok(())
    }

    #[inline]
    fn player_index(&self) -> usize {
        usize::from(self.current_player - 1)
    }

    /// Local placement rules: the centre is free and the wall does not
    /// overlap a parallel wall on either side.
    fn fits(&self, vertex: usize, orientation: Orientation) -> bool {
        if !self.walls[vertex].is_empty() {
            return false;
        }
        let [north, south, east, west] = self.lattice.cardinal_neighbors(vertex);
        let (a, b) = match orientation {
            Orientation::Vertical => (north, south),
            Orientation::Horizontal => (east, west),
        };
        let flag = orientation.flag();
        !self.walls[a].contains(flag) && !self.walls[b].contains(flag)
    }

    /// A wall can only close a region if both of its ends meet another wall
    /// or the rim. Ends meet through a crossing wall or rim vertex in the
    /// ring, or through a same-orientation wall centred two steps along.
    fn touches_wall(&self, vertex: usize, orientation: Orientation) -> bool {
        let crossing = orientation.opposite().flag();
        let parallel = orientation.flag();
        self.lattice
            .ring(vertex)
            .iter()
            .any(|&v| self.walls[v].contains(crossing))
            || self
                .lattice
                .collinear_ends(vertex, orientation)
                .any(|v| self.walls[v].contains(parallel))
    }

    /// Whether both pawns keep a route to goal with the wall in place.
    /// `scratch` is a copy of the graph made on first use and shared
    /// across candidate walls.
    fn keeps_paths(&self, scratch: &mut Option<CellGraph>, vertex: usize, orientation: Orientation) -> bool {
        if !self.touches_wall(vertex, orientation) {
            return true;
        }
        let graph = scratch.get_or_insert_with(|| self.cell_graph.clone());
        let trial = WallProbe::new(graph, self.lattice.severed_pairs(vertex, orientation));
        [1u8, 2].into_iter().all(|player| {
            trial.reaches(
                self.player_position(player),
                trial.goal(player),
                VisitOrder::for_player(player),
            )
        })
    }

    fn pawn_steps(&self) -> impl Iterator<Item = QuoridorMove> + '_ {
        let from = self.player_positions[self.player_index()];
        let size = self.lattice.board_size();
        let num_cells = self.lattice.num_cells();
        self.cell_graph
            .neighbors(from)
            .iter()
            .filter(move |&&to| to < num_cells)
            .filter_map(move |&to| Direction::between(from, to, size))
            .map(QuoridorMove::Step)
    }

    fn place_wall(&mut self, vertex: usize, orientation: Orientation) {
        let idx = self.player_index();
        self.walls[vertex] = WallFlags::placed(self.current_player, orientation);
        self.num_player_walls[idx] = self.num_player_walls[idx].saturating_sub(1);
        for (a, b) in self.lattice.severed_pairs(vertex, orientation) {
            self.cell_graph.disconnect(a, b);
        }
    }

    fn check_for_win(&mut self) {
        let size = self.lattice.board_size();
        if self.player_positions[0] < size {
            self.winner = Some(1);
        } else if self.player_positions[1] >= size * (size - 1) {
            self.winner = Some(2);
        }
    }

    fn cell_label(&self, cell: usize) -> &'static str {
        match (cell == self.player_positions[0], cell == self.player_positions[1]) {
            (true, true) => "1&2",
            (true, false) => " 1 ",
            (false, true) => " 2 ",
            (false, false) => " . ",
        }
    }
}

impl Default for QuoridorState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for QuoridorState {
    type Move = QuoridorMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        let mut moves = Vec::new();
        if self.winner.is_some() {
            return moves;
        }

        if self.num_player_walls[self.player_index()] > 0 {
            let mut scratch = None;
            for &vertex in &self.non_rim_walls {
                for orientation in [Orientation::Vertical, Orientation::Horizontal] {
                    if self.fits(vertex, orientation) && self.keeps_paths(&mut scratch, vertex, orientation) {
                        moves.push(QuoridorMove::Wall(orientation, vertex));
                    }
                }
            }
        }

        moves.extend(self.pawn_steps());
        moves
    }

    fn make_move(&mut self, mv: &Self::Move) {
        assert!(self.winner.is_none(), "move {} played on a finished game", mv);
        match *mv {
            QuoridorMove::Step(direction) => {
                let idx = self.player_index();
                let from = self.player_positions[idx];
                self.player_positions[idx] = direction.target(from, self.lattice.board_size());
            }
            QuoridorMove::Wall(orientation, vertex) => self.place_wall(vertex, orientation),
        }
        self.check_for_win();
        self.current_player = opponent(self.current_player);
    }

    fn get_winner(&self) -> Option<u8> {
        self.winner
    }

    fn get_current_player(&self) -> u8 {
        self.current_player
    }

    fn is_legal(&self, mv: &Self::Move) -> bool {
        if self.winner.is_some() {
            return false;
        }
        match *mv {
            QuoridorMove::Step(_) => self.pawn_steps().any(|step| step == *mv),
            QuoridorMove::Wall(orientation, vertex) => self.is_wall_legal(vertex, orientation),
        }
    }
}

impl fmt::Display for QuoridorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.lattice.board_size();
        let border = format!("+{}+", "-".repeat(4 * size - 1));

        writeln!(f, "{border}")?;
        for row in 0..size {
            write!(f, "|")?;
            for col in 0..size {
                let cell = row * size + col;
                write!(f, "{}", self.cell_label(cell))?;
                if col + 1 < size {
                    let open = self.cell_graph.has_edge(cell, cell + 1);
                    write!(f, "{}", if open { ' ' } else { '|' })?;
                }
            }
            writeln!(f, "|")?;

            if row + 1 < size {
                write!(f, "|")?;
                for col in 0..size {
                    let cell = row * size + col;
                    let open = self.cell_graph.has_edge(cell, cell + size);
                    write!(f, "{}", if open { "   " } else { "---" })?;
                    if col + 1 < size {
                        let joint = self.walls[self.lattice.south_east_vertex(cell)];
                        write!(f, "{}", if joint.is_empty() { ' ' } else { '+' })?;
                    }
                }
                writeln!(f, "|")?;
            }
        }
        writeln!(f, "{border}")?;
        write!(
            f,
            "walls left: P1 {}  P2 {}  to move: P{}",
            self.num_player_walls[0], self.num_player_walls[1], self.current_player
        )
    }
}
