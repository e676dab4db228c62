//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous `Vec` and refer to each other by [`NodeId`].
//! A node owns its children through the index list; the parent link is a
//! plain index used only when walking back up during backpropagation.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::GameState;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the search tree, wrapping one game state snapshot.
#[derive(Clone)]
pub struct Node<S: GameState> {
    /// The state reached at this node
    pub state: S,
    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,
    /// Move that produced this node from its parent
    pub mv: Option<S::Move>,
    /// Number of backpropagations through this node
    pub visits: u32,
    /// Sum of rewards, from the point of view of the player who moved into this node
    pub value: f64,
    /// Expanded children in creation order
    pub children: Vec<NodeId>,
    /// Untried moves, shuffled once at creation and popped from the back
    frontier: Vec<S::Move>,
}

impl<S: GameState> Node<S> {
    fn new<R: Rng + ?Sized>(state: S, parent: Option<NodeId>, mv: Option<S::Move>, rng: &mut R) -> Self {
        let mut frontier = if state.is_terminal() {
            Vec::new()
        } else {
            state.get_possible_moves()
        };
        frontier.shuffle(rng);
        Self {
            state,
            parent,
            mv,
            visits: 0,
            value: 0.0,
            children: Vec::new(),
            frontier,
        }
    }

    /// True once every legal move has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.frontier.is_empty()
    }

    /// True when the wrapped state has a winner (or a draw).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Number of moves not yet expanded.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Average reward, 0.0 for an unvisited node.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / self.visits as f64
        }
    }

    /// UCT score of this node seen from a parent with `parent_visits` visits.
    pub fn uct(&self, parent_visits: u32, exploration_constant: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = self.visits as f64;
        self.value / n + exploration_constant * ((parent_visits as f64).ln() / n).sqrt()
    }
}

/// Search tree rooted at a single game state.
#[derive(Clone)]
pub struct SearchTree<S: GameState> {
    nodes: Vec<Node<S>>,
}

impl<S: GameState> SearchTree<S> {
    /// Creates a tree holding only the root. The root's frontier is shuffled with `rng`.
    pub fn new<R: Rng + ?Sized>(root_state: S, rng: &mut R) -> Self {
        Self {
            nodes: vec![Node::new(root_state, None, None, rng)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks down from `from`: stops at a terminal node, expands the first
    /// node that still has untried moves, otherwise follows the best UCT child.
    pub fn select<R: Rng + ?Sized>(&mut self, from: NodeId, exploration_constant: f64, rng: &mut R) -> NodeId {
        let mut current = from;
        loop {
            if self.get(current).is_terminal() {
                return current;
            }
            if let Some(child) = self.expand(current, rng) {
                return child;
            }
            match self.best_uct_child(current, exploration_constant) {
                Some(child) => current = child,
                None => {
                    warn!(node = current.0, "non-terminal node has no legal moves");
                    return current;
                }
            }
        }
    }

    /// Pops one untried move off `id`'s frontier and adds the resulting child.
    /// Returns `None` when the node is already fully expanded.
    pub fn expand<R: Rng + ?Sized>(&mut self, id: NodeId, rng: &mut R) -> Option<NodeId> {
        let mv = self.get_mut(id).frontier.pop()?;
        let mut state = self.get(id).state.clone();
        state.make_move(&mv);

        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(state, Some(id), Some(mv), rng));
        self.get_mut(id).children.push(child_id);
        Some(child_id)
    }

    /// Child with the highest UCT score; ties go to the earliest child.
    pub fn best_uct_child(&self, id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let node = self.get(id);
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &node.children {
            let score = self.get(child).uct(node.visits, exploration_constant);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Plays uniformly random moves from a copy of `id`'s state until the game ends.
    ///
    /// The reward is credited to the player who moved into `id`: +1 if they
    /// won, -1 if the player to move at `id` won, 0 for a draw.
    pub fn simulate<R: Rng + ?Sized>(&self, id: NodeId, rng: &mut R) -> f64 {
        let mut state = self.get(id).state.clone();
        let to_move = state.get_current_player();

        while state.get_winner().is_none() {
            let moves = state.get_possible_moves();
            if moves.is_empty() {
                warn!(player = to_move, "rollout reached a position with no legal moves");
                return 0.0;
            }
            let mv = &moves[rng.random_range(0..moves.len())];
            state.make_move(mv);
        }

        match state.get_winner() {
            Some(crate::DRAW) | None => 0.0,
            Some(winner) if winner == to_move => -1.0,
            Some(_) => 1.0,
        }
    }

    /// Adds one visit and `reward` to `id`, then walks to the root negating
    /// the reward at every level.
    pub fn backpropagate(&mut self, id: NodeId, reward: f64) {
        let mut current = Some(id);
        let mut reward = reward;
        while let Some(node_id) = current {
            let node = self.get_mut(node_id);
            node.visits += 1;
            node.value += reward;
            reward = -reward;
            current = node.parent;
        }
    }

    /// One full round of select, simulate and backpropagate from the root.
    pub fn iterate<R: Rng + ?Sized>(&mut self, exploration_constant: f64, rng: &mut R) -> NodeId {
        let leaf = self.select(self.root(), exploration_constant, rng);
        let reward = self.simulate(leaf, rng);
        self.backpropagate(leaf, reward);
        leaf
    }

    /// Move of the root child with the greatest average value, not the most
    /// visited one. Ties go to the earliest child.
    pub fn best_move(&self) -> Option<S::Move> {
        let root = self.get(self.root());
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &root.children {
            let mean = self.get(child).mean_value();
            if best.map_or(true, |(_, top)| mean > top) {
                best = Some((child, mean));
            }
        }
        best.and_then(|(child, _)| self.get(child).mv.clone())
    }

    /// `(move, value, visits)` for every expanded root child, in creation order.
    pub fn root_children_stats(&self) -> Vec<(S::Move, f64, u32)> {
        self.get(self.root())
            .children
            .iter()
            .filter_map(|&child| {
                let node = self.get(child);
                node.mv.clone().map(|mv| (mv, node.value, node.visits))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::TicTacToeState;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(7)
    }

    #[test]
    fn test_new_tree_has_full_frontier() {
        let mut rng = rng();
        let tree = SearchTree::new(TicTacToeState::new(), &mut rng);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(tree.root()).frontier_len(), 9);
        assert!(!tree.get(tree.root()).is_fully_expanded());
    }

    #[test]
    fn test_expand_adds_children_until_frontier_empty() {
        let mut rng = rng();
        let mut tree = SearchTree::new(TicTacToeState::new(), &mut rng);
        let root = tree.root();
        for expected in 1..=9 {
            let child = tree.expand(root, &mut rng).unwrap();
            assert_eq!(tree.get(root).children.len(), expected);
            assert_eq!(tree.get(child).parent, Some(root));
            assert_eq!(tree.get(child).state.get_current_player(), 2);
        }
        assert!(tree.get(root).is_fully_expanded());
        assert!(tree.expand(root, &mut rng).is_none());
    }

    #[test]
    fn test_expanded_children_cover_every_move() {
        let mut rng = rng();
        let mut tree = SearchTree::new(TicTacToeState::new(), &mut rng);
        let root = tree.root();
        while tree.expand(root, &mut rng).is_some() {}
        let mut moves: Vec<usize> = tree.root_children_stats().into_iter().map(|(mv, _, _)| mv.0).collect();
        moves.sort_unstable();
        assert_eq!(moves, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_backpropagate_alternates_sign() {
        let mut rng = rng();
        let mut tree = SearchTree::new(TicTacToeState::new(), &mut rng);
        let root = tree.root();
        let child = tree.expand(root, &mut rng).unwrap();
        let grandchild = tree.expand(child, &mut rng).unwrap();

        tree.backpropagate(grandchild, 1.0);

        assert_eq!(tree.get(grandchild).visits, 1);
        assert_eq!(tree.get(child).visits, 1);
        assert_eq!(tree.get(root).visits, 1);
        assert_eq!(tree.get(grandchild).value, 1.0);
        assert_eq!(tree.get(child).value, -1.0);
        assert_eq!(tree.get(root).value, 1.0);
    }

    #[test]
    fn test_uct_prefers_unvisited_and_rewards_value() {
        let mut rng = rng();
        let mut tree = SearchTree::new(TicTacToeState::new(), &mut rng);
        let root = tree.root();
        let a = tree.expand(root, &mut rng).unwrap();
        let b = tree.expand(root, &mut rng).unwrap();
        tree.backpropagate(a, 1.0);
        tree.backpropagate(b, -1.0);
        assert_eq!(tree.best_uct_child(root, std::f64::consts::SQRT_2), Some(a));
        assert!(tree.get(a).uct(2, 0.0) > tree.get(b).uct(2, 0.0));
    }

    #[test]
    fn test_uct_ties_go_to_first_child() {
        let mut rng = rng();
        let mut tree = SearchTree::new(TicTacToeState::new(), &mut rng);
        let root = tree.root();
        let a = tree.expand(root, &mut rng).unwrap();
        let b = tree.expand(root, &mut rng).unwrap();
        tree.backpropagate(a, 0.0);
        tree.backpropagate(b, 0.0);
        assert_eq!(tree.best_uct_child(root, 1.0), Some(a));
    }

    #[test]
    fn test_select_stops_at_terminal_node() {
        // X: 0, 1 / O: 3, 4 / X to move; playing 2 wins.
        let mut state = TicTacToeState::new();
        for cell in [0, 3, 1, 4, 2] {
            state.make_move(&crate::games::tictactoe::TicTacToeMove(cell));
        }
        assert!(state.is_terminal());
        let mut rng = rng();
        let mut tree = SearchTree::new(state, &mut rng);
        let root = tree.root();
        assert_eq!(tree.select(root, 1.0, &mut rng), root);
    }

    #[test]
    fn test_simulate_on_won_state_credits_the_mover() {
        let mut state = TicTacToeState::new();
        for cell in [0, 3, 1, 4, 2] {
            state.make_move(&crate::games::tictactoe::TicTacToeMove(cell));
        }
        let mut rng = rng();
        let tree = SearchTree::new(state, &mut rng);
        assert_eq!(tree.simulate(tree.root(), &mut rng), 1.0);
    }
}
