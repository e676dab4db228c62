//! Adjacency graph over board cells plus two goal sentinels.

use std::ops::Deref;

/// Neighbour visiting order used by the reachability search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOrder {
    Ascending,
    Descending,
}

impl VisitOrder {
    /// Player 1 searches lowest ids first, player 2 highest first.
    pub fn for_player(player: u8) -> Self {
        if player == 1 {
            VisitOrder::Ascending
        } else {
            VisitOrder::Descending
        }
    }
}

/// Cell adjacency for an N×N board.
///
/// Nodes `0..N²` are cells; `N²` is player 1's goal and `N²+1` player 2's.
/// Top-row cells carry a one-way edge to player 1's goal and bottom-row cells
/// to player 2's. Sentinels have no outgoing edges. Neighbour lists are kept
/// sorted so traversal order only depends on the set of edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGraph {
    board_size: usize,
    adjacency: Vec<Vec<usize>>,
}

impl CellGraph {
    /// A fully open board.
    pub fn new(board_size: usize) -> Self {
        let num_cells = board_size * board_size;
        let mut adjacency = vec![Vec::with_capacity(4); num_cells + 2];

        for cell in 0..num_cells {
            let (row, col) = (cell / board_size, cell % board_size);
            let list = &mut adjacency[cell];
            if row > 0 {
                list.push(cell - board_size);
            }
            if col > 0 {
                list.push(cell - 1);
            }
            if col + 1 < board_size {
                list.push(cell + 1);
            }
            if row + 1 < board_size {
                list.push(cell + board_size);
            }
            if row == 0 {
                list.push(num_cells);
            }
            if row + 1 == board_size {
                list.push(num_cells + 1);
            }
        }

        Self {
            board_size,
            adjacency,
        }
    }

    #[inline]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.board_size * self.board_size
    }

    /// Sentinel node for `player`'s goal row.
    #[inline]
    pub fn goal(&self, player: u8) -> usize {
        if player == 1 {
            self.num_cells()
        } else {
            self.num_cells() + 1
        }
    }

    #[inline]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].binary_search(&b).is_ok()
    }

    /// Removes the undirected edge `a`–`b`.
    ///
    /// # Panics
    /// Panics if the edge is not present; the graph would no longer match
    /// the walls on the board.
    pub fn disconnect(&mut self, a: usize, b: usize) {
        self.remove_half(a, b);
        self.remove_half(b, a);
    }

    /// Restores the undirected edge `a`–`b`.
    ///
    /// # Panics
    /// Panics if the edge is already present.
    pub fn connect(&mut self, a: usize, b: usize) {
        self.insert_half(a, b);
        self.insert_half(b, a);
    }

    fn remove_half(&mut self, from: usize, to: usize) {
        let list = &mut self.adjacency[from];
        match list.binary_search(&to) {
            Ok(pos) => {
                list.remove(pos);
            }
            Err(_) => panic!("cell graph out of sync: no edge {from} -> {to} to remove"),
        }
    }

    fn insert_half(&mut self, from: usize, to: usize) {
        let list = &mut self.adjacency[from];
        match list.binary_search(&to) {
            Ok(_) => panic!("cell graph out of sync: edge {from} -> {to} already present"),
            Err(pos) => list.insert(pos, to),
        }
    }

    /// Depth-first search from `start` towards `goal`.
    pub fn reaches(&self, start: usize, goal: usize, order: VisitOrder) -> bool {
        if start == goal {
            return true;
        }
        let mut visited = vec![false; self.adjacency.len()];
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(node) = stack.pop() {
            let neighbors = &self.adjacency[node];
            if neighbors.contains(&goal) {
                return true;
            }
            // Pushed in reverse so the stack pops them in visiting order.
            let mut push = |next: usize| {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            };
            match order {
                VisitOrder::Ascending => neighbors.iter().rev().for_each(|&n| push(n)),
                VisitOrder::Descending => neighbors.iter().for_each(|&n| push(n)),
            }
        }
        false
    }
}

/// Temporarily severs edges for a wall legality check and restores them on drop.
pub struct WallProbe<'g> {
    graph: &'g mut CellGraph,
    severed: [(usize, usize); 2],
}

impl<'g> WallProbe<'g> {
    pub fn new(graph: &'g mut CellGraph, severed: [(usize, usize); 2]) -> Self {
        for &(a, b) in &severed {
            graph.disconnect(a, b);
        }
        Self { graph, severed }
    }
}

impl Deref for WallProbe<'_> {
    type Target = CellGraph;

    fn deref(&self) -> &CellGraph {
        self.graph
    }
}

impl Drop for WallProbe<'_> {
    fn drop(&mut self) {
        for &(a, b) in self.severed.iter().rev() {
            self.graph.connect(a, b);
        }
    }
}
