//! Task ordering on top of the NSGA-II engine.
//!
//! Tasks are encoded as random keys ([`decode`]), scored by three
//! objectives ([`ObjectiveEvaluator`]) and searched with
//! [`Nsga2Runner`](crate::nsga::Nsga2Runner). The final population is
//! turned into ranked solution records by [`ResultAggregator`].
//!
//! # Key Types
//!
//! - [`TaskOptimizer`]: Runs one optimization request end to end
//! - [`OptimizeRequest`]: Tasks, weights and run-size overrides
//! - [`OptimizationResult`]: Parameters used, ranked solutions, best solution
//! - [`TaskOrderProblem`]: The task ordering as a [`MultiObjectiveProblem`](crate::nsga::MultiObjectiveProblem)

mod aggregate;
mod encoding;
mod objective;
mod optimizer;
mod problem;
mod request;

pub use aggregate::{
    round3, AggregateError, Aggregation, ResultAggregator, SolutionMetrics, SolutionObjectives,
    SolutionRecord, TaskPosition, MAX_SOLUTIONS,
};
pub use encoding::{decode, encode, positions};
pub use objective::{
    efficiency_score, parse_deadline, priority_score, ObjectiveEvaluator, Objectives,
    DEADLINE_PENALTY_PER_HOUR, DEPENDENCY_PENALTY, INVALID_DEADLINE_PENALTY, MAX_DEADLINE_PENALTY,
};
pub use optimizer::{OptimizationResult, TaskOptimizer, ALGORITHM, FALLBACK_ALGORITHM};
pub use problem::TaskOrderProblem;
pub use request::{OptimizeRequest, RunParameters, DEFAULT_SEED};
