//! Monte Carlo Tree Search over pluggable two-player games.
//!
//! The search driver ([`MCTS`]) only talks to games through the [`GameState`]
//! trait. Three games ship with the crate: tic-tac-toe, connect four, and a
//! Quoridor engine whose legal-move generator maintains an adjacency graph
//! and refuses walls that would cut a player off from their goal row.
//!
//! ```
//! use mcts::games::tictactoe::TicTacToeState;
//! use mcts::{MctsConfig, MCTS};
//!
//! let state = TicTacToeState::new();
//! let mut search = MCTS::new(MctsConfig::default().with_iterations(200).with_seed(1));
//! let best = search.search(&state).unwrap();
//! assert!(best.0 < 9);
//! ```

pub mod config;
pub mod error;
pub mod games;
pub mod tree;

pub use config::MctsConfig;
pub use error::{GameError, QuoridorError, SearchError};
pub use tree::{Node, NodeId, SearchTree};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Winner value reported for a drawn game.
pub const DRAW: u8 = 0;

/// The other player of a two-player game (players are numbered 1 and 2).
#[inline]
pub fn opponent(player: u8) -> u8 {
    3 - player
}

/// The state of the game. Must be cloneable to be used in the MCTS; a clone
/// must share no mutable data with its source.
/// `Send` and `Sync` are required for parallel processing.
pub trait GameState: Clone + Send + Sync {
    /// The type of a move in the game.
    type Move: Clone + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync;

    /// Returns all moves the current player may make.
    /// Empty only when the game is over.
    fn get_possible_moves(&self) -> Vec<Self::Move>;
    /// Applies a move for the current player, records a winner if the move
    /// ends the game, and hands the turn to the other player.
    ///
    /// The move is trusted to come from `get_possible_moves`.
    ///
    /// # Panics
    /// Panics if the game already has a winner.
    fn make_move(&mut self, mv: &Self::Move);
    /// `None` while the game is running, `Some(DRAW)` for a draw, otherwise
    /// `Some(player)`.
    fn get_winner(&self) -> Option<u8>;
    /// Returns the player whose turn it is to move (1 or 2).
    fn get_current_player(&self) -> u8;

    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool {
        self.get_winner().is_some()
    }

    /// Checks a move against the legal move list. Meant for validating
    /// untrusted input, not for the search loop.
    fn is_legal(&self, mv: &Self::Move) -> bool {
        !self.is_terminal() && self.get_possible_moves().contains(mv)
    }
}

/// Summary of the last search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStatistics {
    /// Rounds of select/simulate/backpropagate performed
    pub iterations: u32,
    /// Nodes in the tree (summed over workers for parallel search)
    pub total_nodes: usize,
    /// Visits recorded at the root
    pub root_visits: u32,
    /// Average value of the chosen child
    pub best_value: f64,
}

/// The main MCTS engine.
pub struct MCTS<S: GameState> {
    config: MctsConfig,
    rng: Xoshiro256PlusPlus,
    /// Tree of the last sequential search, kept for inspection.
    last_tree: Option<SearchTree<S>>,
    /// Root-child statistics of the last search.
    last_root_stats: Vec<(S::Move, f64, u32)>,
    last_statistics: Option<SearchStatistics>,
}

impl<S: GameState> MCTS<S> {
    /// Creates a new MCTS engine. Without a configured seed, one is drawn
    /// from the thread-local generator.
    pub fn new(config: MctsConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!(seed, iterations = config.iterations, "creating search driver");
        MCTS {
            config,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            last_tree: None,
            last_root_stats: Vec::new(),
            last_statistics: None,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Runs the configured number of iterations from a fresh root built
    /// from `state` and returns the best move.
    pub fn search(&mut self, state: &S) -> Result<S::Move, SearchError> {
        let iterations = self.config.iterations;
        self.search_iterations(state, iterations)
    }

    /// Like [`MCTS::search`] with an explicit iteration budget.
    pub fn search_iterations(&mut self, state: &S, iterations: u32) -> Result<S::Move, SearchError> {
        check_searchable(state)?;

        let mut tree = SearchTree::new(state.clone(), &mut self.rng);
        let best = self.run(&mut tree, iterations);

        let stats = tree.root_children_stats();
        let best_value = best_mean(&stats);
        self.last_statistics = Some(SearchStatistics {
            iterations,
            total_nodes: tree.len(),
            root_visits: tree.get(tree.root()).visits,
            best_value,
        });
        self.last_root_stats = stats;
        self.last_tree = Some(tree);

        let best = best.ok_or(SearchError::EmptyTree(iterations))?;
        debug!(?best, best_value, iterations, "search finished");
        Ok(best)
    }

    /// Drive loop: exactly `iterations` rounds from the root of `tree`,
    /// then the root child with the greatest average value.
    pub fn run(&mut self, tree: &mut SearchTree<S>, iterations: u32) -> Option<S::Move> {
        let c = self.config.exploration_constant;
        for i in 0..iterations {
            let leaf = tree.iterate(c, &mut self.rng);
            trace!(iteration = i, leaf = leaf.0, "iteration complete");
        }
        tree.best_move()
    }

    /// Root-parallel search: independent trees on a rayon pool, one per
    /// worker, each seeded from this driver's generator. Root statistics
    /// are summed per move before picking the best average.
    pub fn search_parallel(&mut self, state: &S) -> Result<S::Move, SearchError> {
        check_searchable(state)?;

        let threads = self.config.effective_threads().max(1);
        let iterations = self.config.iterations;
        let c = self.config.exploration_constant;
        let seeds: Vec<u64> = (0..threads).map(|_| self.rng.random()).collect();

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| SearchError::ThreadPool(e.to_string()))?;

        let per_worker: Vec<(Vec<(S::Move, f64, u32)>, usize)> = pool.install(|| {
            seeds
                .into_par_iter()
                .enumerate()
                .map(|(worker, seed)| {
                    let budget = worker_budget(iterations, threads, worker);
                    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
                    let mut tree = SearchTree::new(state.clone(), &mut rng);
                    for _ in 0..budget {
                        tree.iterate(c, &mut rng);
                    }
                    (tree.root_children_stats(), tree.len())
                })
                .collect()
        });

        let total_nodes = per_worker.iter().map(|(_, nodes)| nodes).sum();
        let merged = merge_root_stats(per_worker.into_iter().map(|(stats, _)| stats));
        let best_value = best_mean(&merged);
        let best = merged
            .iter()
            .filter(|(_, _, visits)| *visits > 0)
            .fold(None::<(&S::Move, f64)>, |best, (mv, value, visits)| {
                let mean = value / *visits as f64;
                match best {
                    Some((_, top)) if top >= mean => best,
                    _ => Some((mv, mean)),
                }
            })
            .map(|(mv, _)| mv.clone());

        self.last_statistics = Some(SearchStatistics {
            iterations,
            total_nodes,
            root_visits: merged.iter().map(|(_, _, visits)| visits).sum(),
            best_value,
        });
        self.last_root_stats = merged;
        self.last_tree = None;

        let best = best.ok_or(SearchError::EmptyTree(iterations))?;
        debug!(?best, best_value, threads, iterations, "parallel search finished");
        Ok(best)
    }

    /// Returns `(move, value, visits)` for the root children of the last search.
    pub fn get_root_children_stats(&self) -> &[(S::Move, f64, u32)] {
        &self.last_root_stats
    }

    pub fn last_statistics(&self) -> Option<SearchStatistics> {
        self.last_statistics
    }

    /// The tree built by the last sequential search.
    pub fn last_tree(&self) -> Option<&SearchTree<S>> {
        self.last_tree.as_ref()
    }
}

fn check_searchable<S: GameState>(state: &S) -> Result<(), SearchError> {
    if let Some(winner) = state.get_winner() {
        return Err(SearchError::TerminalState(winner));
    }
    if state.get_possible_moves().is_empty() {
        return Err(SearchError::NoLegalMoves);
    }
    Ok(())
}

/// Splits `iterations` across `workers`, handing the remainder to the first ones.
fn worker_budget(iterations: u32, workers: usize, worker: usize) -> u32 {
    let workers = workers as u32;
    let worker = worker as u32;
    iterations / workers + u32::from(worker < iterations % workers)
}

/// Sums per-move statistics, keeping moves in first-seen order so tie-breaks
/// stay deterministic.
fn merge_root_stats<M, I>(workers: I) -> Vec<(M, f64, u32)>
where
    M: Clone + Eq + std::hash::Hash,
    I: IntoIterator<Item = Vec<(M, f64, u32)>>,
{
    let mut index: HashMap<M, usize> = HashMap::new();
    let mut merged: Vec<(M, f64, u32)> = Vec::new();
    for stats in workers {
        for (mv, value, visits) in stats {
            match index.get(&mv) {
                Some(&i) => {
                    merged[i].1 += value;
                    merged[i].2 += visits;
                }
                None => {
                    index.insert(mv.clone(), merged.len());
                    merged.push((mv, value, visits));
                }
            }
        }
    }
    merged
}

fn best_mean<M>(stats: &[(M, f64, u32)]) -> f64 {
    stats
        .iter()
        .filter(|(_, _, visits)| *visits > 0)
        .map(|(_, value, visits)| value / *visits as f64)
        .fold(f64::NEG_INFINITY, f64::max)
}
