//! Wall flags and the vertex lattice walls are placed on.
//!
//! An N×N cell board has an (N+1)×(N+1) lattice of vertices. Vertex `(r, c)`
//! is the corner shared by cells `(r-1, c-1)`, `(r-1, c)`, `(r, c-1)` and
//! `(r, c)`. A player wall is centred on one non-rim vertex and is two cells
//! long, so it separates two pairs of those four cells.

use std::fmt;
use std::ops::BitOr;

/// Orientation of a wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flag(self) -> WallFlags {
        match self {
            Orientation::Horizontal => WallFlags::HORIZONTAL,
            Orientation::Vertical => WallFlags::VERTICAL,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Single-letter tag used in the move notation.
    pub fn tag(self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }
}

/// Bit set stored at each lattice vertex: who placed the wall and which way it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WallFlags(u8);

impl WallFlags {
    pub const EMPTY: WallFlags = WallFlags(0);
    pub const PLAYER1: WallFlags = WallFlags(1);
    pub const PLAYER2: WallFlags = WallFlags(2);
    pub const HORIZONTAL: WallFlags = WallFlags(4);
    pub const VERTICAL: WallFlags = WallFlags(8);

    /// Flags for a wall placed by `player` (1 or 2).
    pub fn placed(player: u8, orientation: Orientation) -> Self {
        let owner = if player == 1 { Self::PLAYER1 } else { Self::PLAYER2 };
        owner | orientation.flag()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set. `other` must not be empty.
    #[inline]
    pub fn contains(self, other: WallFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn orientation(self) -> Option<Orientation> {
        if self.contains(Self::HORIZONTAL) {
            Some(Orientation::Horizontal)
        } else if self.contains(Self::VERTICAL) {
            Some(Orientation::Vertical)
        } else {
            None
        }
    }

    /// The player who placed the wall; `None` for empty and border vertices.
    pub fn placer(self) -> Option<u8> {
        if self.contains(Self::PLAYER1) {
            Some(1)
        } else if self.contains(Self::PLAYER2) {
            Some(2)
        } else {
            None
        }
    }
}

impl BitOr for WallFlags {
    type Output = WallFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        WallFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for WallFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index arithmetic between cells and lattice vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    board_size: usize,
    vertex_size: usize,
}

impl Lattice {
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            vertex_size: board_size + 1,
        }
    }

    #[inline]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    #[inline]
    pub fn vertex_size(&self) -> usize {
        self.vertex_size
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.board_size * self.board_size
    }

    #[inline]
    pub fn num_vertexes(&self) -> usize {
        self.vertex_size * self.vertex_size
    }

    /// `(row, col)` of a vertex.
    #[inline]
    pub fn vertex_coords(&self, vertex: usize) -> (usize, usize) {
        (vertex / self.vertex_size, vertex % self.vertex_size)
    }

    pub fn is_rim(&self, vertex: usize) -> bool {
        let (row, col) = self.vertex_coords(vertex);
        let last = self.vertex_size - 1;
        row == 0 || col == 0 || row == last || col == last
    }

    /// Vertices a player may put a wall on, in ascending order.
    pub fn non_rim_vertices(&self) -> Vec<usize> {
        (0..self.num_vertexes()).filter(|&v| !self.is_rim(v)).collect()
    }

    /// Initial flags: top and bottom rows horizontal, left and right columns vertical.
    pub fn rim_walls(&self) -> Vec<WallFlags> {
        let mut walls = vec![WallFlags::EMPTY; self.num_vertexes()];
        let last = self.vertex_size - 1;
        for (vertex, flags) in walls.iter_mut().enumerate() {
            let (row, col) = self.vertex_coords(vertex);
            if row == 0 || row == last {
                *flags = WallFlags::HORIZONTAL;
            } else if col == 0 || col == last {
                *flags = WallFlags::VERTICAL;
            }
        }
        walls
    }

    /// North, south, east and west neighbours of a non-rim vertex.
    #[inline]
    pub fn cardinal_neighbors(&self, vertex: usize) -> [usize; 4] {
        [
            vertex - self.vertex_size,
            vertex + self.vertex_size,
            vertex + 1,
            vertex - 1,
        ]
    }

    /// The eight vertices around a non-rim vertex (its 3×3 block minus the centre).
    pub fn ring(&self, vertex: usize) -> [usize; 8] {
        let up = vertex - self.vertex_size;
        let down = vertex + self.vertex_size;
        [up - 1, up, up + 1, vertex - 1, vertex + 1, down - 1, down, down + 1]
    }

    /// Vertices two steps away along `orientation`, where a wall of the same
    /// orientation would meet this one end to end. Off-lattice steps are skipped.
    pub fn collinear_ends(&self, vertex: usize, orientation: Orientation) -> impl Iterator<Item = usize> {
        let (row, col) = self.vertex_coords(vertex);
        let last = self.vertex_size - 1;
        let (along, stride) = match orientation {
            Orientation::Horizontal => (col, 2),
            Orientation::Vertical => (row, 2 * self.vertex_size),
        };
        [
            (along >= 2).then(|| vertex - stride),
            (along + 2 <= last).then(|| vertex + stride),
        ]
        .into_iter()
        .flatten()
    }

    /// The four cells around a non-rim vertex, in NW, NE, SW, SE order.
    #[inline]
    pub fn surrounding_cells(&self, vertex: usize) -> [usize; 4] {
        let (row, col) = self.vertex_coords(vertex);
        let nw = (row - 1) * self.board_size + (col - 1);
        let sw = nw + self.board_size;
        [nw, nw + 1, sw, sw + 1]
    }

    /// The cell adjacencies a wall at `vertex` cuts.
    /// Horizontal: NW-SW and NE-SE. Vertical: NW-NE and SW-SE.
    #[inline]
    pub fn severed_pairs(&self, vertex: usize, orientation: Orientation) -> [(usize, usize); 2] {
        let [nw, ne, sw, se] = self.surrounding_cells(vertex);
        match orientation {
            Orientation::Horizontal => [(nw, sw), (ne, se)],
            Orientation::Vertical => [(nw, ne), (sw, se)],
        }
    }

    /// On-board cells touching any vertex, rim vertices included.
    pub fn vertex_cells(&self, vertex: usize) -> Vec<usize> {
        let (row, col) = self.vertex_coords(vertex);
        let mut cells = Vec::with_capacity(4);
        for r in [row.wrapping_sub(1), row] {
            for c in [col.wrapping_sub(1), col] {
                if r < self.board_size && c < self.board_size {
                    cells.push(r * self.board_size + c);
                }
            }
        }
        cells
    }

    /// Lattice vertex at the south-east corner of `cell`.
    #[inline]
    pub fn south_east_vertex(&self, cell: usize) -> usize {
        let (row, col) = (cell / self.board_size, cell % self.board_size);
        (row + 1) * self.vertex_size + col + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let flags = WallFlags::placed(2, Orientation::Vertical);
        assert!(flags.contains(WallFlags::VERTICAL));
        assert!(!flags.contains(WallFlags::HORIZONTAL));
        assert_eq!(flags.placer(), Some(2));
        assert_eq!(flags.orientation(), Some(Orientation::Vertical));
        assert_eq!(WallFlags::HORIZONTAL.placer(), None);
        assert!(WallFlags::EMPTY.is_empty());
    }

    #[test]
    fn test_rim_layout() {
        let lattice = Lattice::new(9);
        let walls = lattice.rim_walls();
        assert_eq!(walls.len(), 100);
        assert_eq!(walls[0], WallFlags::HORIZONTAL);
        assert_eq!(walls[95], WallFlags::HORIZONTAL);
        assert_eq!(walls[10], WallFlags::VERTICAL);
        assert_eq!(walls[19], WallFlags::VERTICAL);
        assert_eq!(walls[11], WallFlags::EMPTY);
        assert_eq!(lattice.non_rim_vertices().len(), 64);
    }

    #[test]
    fn test_vertex_cells() {
        let lattice = Lattice::new(9);
        assert_eq!(lattice.vertex_cells(24), vec![12, 13, 21, 22]);
        assert_eq!(lattice.vertex_cells(0), vec![0]);
        assert_eq!(lattice.vertex_cells(9), vec![8]);
        assert_eq!(lattice.vertex_cells(99), vec![80]);
    }

    #[test]
    fn test_surrounding_cells_and_severed_pairs() {
        let lattice = Lattice::new(9);
        assert_eq!(lattice.surrounding_cells(23), [11, 12, 20, 21]);
        assert_eq!(lattice.severed_pairs(23, Orientation::Horizontal), [(11, 20), (12, 21)]);
        assert_eq!(lattice.severed_pairs(15, Orientation::Vertical), [(4, 5), (13, 14)]);
    }

    #[test]
    fn test_ring_and_neighbors() {
        let lattice = Lattice::new(9);
        assert_eq!(lattice.cardinal_neighbors(44), [34, 54, 45, 43]);
        assert_eq!(lattice.ring(44), [33, 34, 35, 43, 45, 53, 54, 55]);
        assert_eq!(lattice.south_east_vertex(12), 24);
    }

    #[test]
    fn test_collinear_ends() {
        let lattice = Lattice::new(9);
        let ends = |v, o| lattice.collinear_ends(v, o).collect::<Vec<_>>();
        assert_eq!(ends(43, Orientation::Horizontal), vec![41, 45]);
        assert_eq!(ends(44, Orientation::Vertical), vec![24, 64]);
        assert_eq!(ends(11, Orientation::Horizontal), vec![13]);
        assert_eq!(ends(18, Orientation::Vertical), vec![38]);
        assert_eq!(ends(88, Orientation::Vertical), vec![68]);
    }
}
