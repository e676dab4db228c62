//! Search configuration parameters.

/// Configuration for the MCTS driver.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of select/simulate/backpropagate rounds per search.
    pub iterations: u32,

    /// Exploration constant `C` in the UCT formula.
    /// `value/visits + C * sqrt(ln(parent_visits) / visits)`
    pub exploration_constant: f64,

    /// Seed for frontier shuffling and rollouts. `None` draws a fresh seed
    /// from the thread-local generator, so searches are not reproducible.
    pub seed: Option<u64>,

    /// Worker threads for `search_parallel`. 0 means one per logical CPU.
    pub num_threads: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration_constant: std::f64::consts::SQRT_2,
            seed: None,
            num_threads: 0,
        }
    }
}

impl MctsConfig {
    /// A small, seeded configuration for tests.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            seed: Some(42),
            num_threads: 2,
            ..Self::default()
        }
    }

    /// Builder pattern: set the iteration budget.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder pattern: set the UCT exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder pattern: set the worker count for parallel search.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Resolves `num_threads`, mapping 0 to the number of logical CPUs.
    pub fn effective_threads(&self) -> usize {
        if self.num_threads == 0 {
            num_cpus::get()
        } else {
            self.num_threads
        }
    }
}
