//! NSGA-II configuration.
//!
//! [`Nsga2Config`] holds all parameters that control the evolutionary loop.

/// Configuration for the NSGA-II runner.
///
/// # Defaults
///
/// ```
/// use task_nsga::nsga::Nsga2Config;
///
/// let config = Nsga2Config::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// assert!(config.mutation_prob.is_none()); // 1 / dimensions
/// ```
///
/// # Builder Pattern
///
/// ```
/// use task_nsga::nsga::Nsga2Config;
///
/// let config = Nsga2Config::for_problem_size(4)
///     .with_crossover_eta(20.0)
///     .with_seed(1)
///     .with_parallel(false);
/// assert_eq!(config.population_size, 40);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Nsga2Config {
    /// Number of candidates kept each generation.
    pub population_size: usize,

    /// Number of generations before termination.
    pub max_generations: usize,

    /// Probability of applying SBX to a selected parent pair (0.0–1.0).
    ///
    /// When crossover is not applied, the parents are copied.
    pub crossover_prob: f64,

    /// SBX distribution index. Larger values keep children near parents.
    pub crossover_eta: f64,

    /// Per-gene polynomial mutation probability (0.0–1.0).
    ///
    /// `None` uses `1 / dimensions`.
    pub mutation_prob: Option<f64>,

    /// Polynomial mutation distribution index.
    pub mutation_eta: f64,

    /// Whether to evaluate candidates in parallel using rayon.
    ///
    /// Only honored when the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed; the runner reports the one it used.
    pub seed: Option<u64>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            crossover_prob: 0.9,
            crossover_eta: 15.0,
            mutation_prob: None,
            mutation_eta: 20.0,
            parallel: true,
            seed: None,
        }
    }
}

impl Nsga2Config {
    /// Largest population chosen by [`for_problem_size`](Self::for_problem_size).
    pub const MAX_AUTO_POPULATION: usize = 50;

    /// Largest generation count chosen by [`for_problem_size`](Self::for_problem_size).
    pub const MAX_AUTO_GENERATIONS: usize = 100;

    /// Largest population accepted by [`validate`](Self::validate).
    pub const MAX_POPULATION: usize = 10_000;

    /// Largest generation count accepted by [`validate`](Self::validate).
    pub const MAX_GENERATIONS: usize = 100_000;

    /// Scales population and generations with the number of decision
    /// variables, bounded to keep runtime small.
    ///
    /// - population: `clamp(10 · n, 20, 50)`
    /// - generations: `clamp(10 · n, 20, 100)`
    pub fn for_problem_size(dimensions: usize) -> Self {
        let scaled = dimensions.saturating_mul(10);
        Self {
            population_size: scaled.clamp(20, Self::MAX_AUTO_POPULATION),
            max_generations: scaled.clamp(20, Self::MAX_AUTO_GENERATIONS),
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_prob(mut self, p: f64) -> Self {
        self.crossover_prob = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the SBX distribution index.
    pub fn with_crossover_eta(mut self, eta: f64) -> Self {
        self.crossover_eta = eta;
        self
    }

    /// Sets a fixed per-gene mutation probability.
    pub fn with_mutation_prob(mut self, p: f64) -> Self {
        self.mutation_prob = Some(p.clamp(0.0, 1.0));
        self
    }

    /// Sets the polynomial mutation distribution index.
    pub fn with_mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = eta;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Per-gene mutation probability for a genome of `dimensions` genes.
    pub fn gene_mutation_prob(&self, dimensions: usize) -> f64 {
        self.mutation_prob
            .unwrap_or_else(|| 1.0 / dimensions.max(1) as f64)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.population_size > Self::MAX_POPULATION {
            return Err(format!(
                "population_size must be at most {}, got {}",
                Self::MAX_POPULATION,
                self.population_size
            ));
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.max_generations > Self::MAX_GENERATIONS {
            return Err(format!(
                "max_generations must be at most {}, got {}",
                Self::MAX_GENERATIONS,
                self.max_generations
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_prob) {
            return Err(format!(
                "crossover_prob must be within [0, 1], got {}",
                self.crossover_prob
            ));
        }
        if let Some(p) = self.mutation_prob {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("mutation_prob must be within [0, 1], got {p}"));
            }
        }
        if !(self.crossover_eta.is_finite() && self.crossover_eta > 0.0) {
            return Err("crossover_eta must be positive".into());
        }
        if !(self.mutation_eta.is_finite() && self.mutation_eta > 0.0) {
            return Err("mutation_eta must be positive".into());
        }
        Ok(())
    }
}
