//! Optimization request and the parameters resolved from it.

use crate::model::{Task, WeightConfig};
use crate::nsga::Nsga2Config;
use crate::ordering::aggregate::MAX_SOLUTIONS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seed used when a request does not name one.
pub const DEFAULT_SEED: u64 = 1;

/// A batch of tasks to order, with optional run parameters.
///
/// ```
/// use task_nsga::ordering::OptimizeRequest;
///
/// let request: OptimizeRequest = serde_json::from_str(r#"{
///     "tasks": [{"id": 1, "title": "a", "energy_required": 3,
///                "importance": 4, "urgency": 2, "ease": 5}],
///     "n_gen": 30
/// }"#).unwrap();
/// assert_eq!(request.seed, 1);
/// assert_eq!(request.max_solutions, 10);
///
/// let config = request.engine_config();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.max_generations, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightConfig>,
    /// Overrides the size-scaled population.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop_size: Option<usize>,
    /// Overrides the size-scaled generation count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_gen: Option<usize>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Requested number of solutions, capped at [`MAX_SOLUTIONS`].
    #[serde(default = "default_max_solutions")]
    pub max_solutions: usize,
    /// Logical start of the simulated schedule. `None` = now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_start: Option<DateTime<Utc>>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_max_solutions() -> usize {
    MAX_SOLUTIONS
}

fn default_parallel() -> bool {
    true
}

impl OptimizeRequest {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            weights: None,
            pop_size: None,
            n_gen: None,
            seed: DEFAULT_SEED,
            max_solutions: MAX_SOLUTIONS,
            run_start: None,
            parallel: true,
        }
    }

    pub fn with_weights(mut self, weights: WeightConfig) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_pop_size(mut self, n: usize) -> Self {
        self.pop_size = Some(n);
        self
    }

    pub fn with_n_gen(mut self, n: usize) -> Self {
        self.n_gen = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_solutions(mut self, n: usize) -> Self {
        self.max_solutions = n;
        self
    }

    pub fn with_run_start(mut self, start: DateTime<Utc>) -> Self {
        self.run_start = Some(start);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Weights in effect, defaults when absent.
    pub fn weights(&self) -> WeightConfig {
        self.weights.unwrap_or_default()
    }

    /// Engine configuration for this request: size-scaled defaults with the
    /// caller's overrides applied.
    pub fn engine_config(&self) -> Nsga2Config {
        let mut config = Nsga2Config::for_problem_size(self.tasks.len())
            .with_seed(self.seed)
            .with_parallel(self.parallel);
        if let Some(n) = self.pop_size {
            config = config.with_population_size(n);
        }
        if let Some(n) = self.n_gen {
            config = config.with_max_generations(n);
        }
        config
    }
}

/// Parameters a run actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub pop_size: usize,
    pub n_gen: usize,
    pub seed: u64,
    pub weights: WeightConfig,
    /// Effective cap on returned solutions.
    pub max_solutions: usize,
}
