//! Multi-objective task ordering with NSGA-II.
//!
//! Orders a batch of tasks to maximize weighted priority and efficiency while
//! minimizing dependency inversions and deadline overruns:
//!
//! - **NSGA-II engine** ([`nsga`]): Generic elitist multi-objective GA over
//!   real-valued genomes with non-dominated sorting, crowding distance,
//!   binary tournament, simulated binary crossover and polynomial mutation.
//! - **Task ordering** ([`ordering`]): Random-key encoding, the three task
//!   objectives, result aggregation and the [`TaskOptimizer`] facade.
//! - **Model** ([`model`]): Serde-ready [`Task`] and [`WeightConfig`].
//! - **Observation** ([`observer`]): Injected run observer; the default one
//!   emits `tracing` events.
//!
//! # Architecture
//!
//! The engine knows nothing about tasks. The task ordering is one
//! implementation of [`nsga::MultiObjectiveProblem`], and every run owns its
//! own seeded RNG, so identical requests produce identical solutions.

pub mod error;
pub mod model;
pub mod nsga;
pub mod observer;
pub mod ordering;

pub use error::{OptimizeError, Result};
pub use model::{Task, TaskId, WeightConfig};
pub use ordering::{OptimizationResult, OptimizeRequest, TaskOptimizer};
