//! Task optimizer facade.
//!
//! [`TaskOptimizer::optimize`] validates a request, runs NSGA-II over the
//! random-key encoding, aggregates the final population and times the run.

use crate::error::{OptimizeError, Result};
use crate::nsga::Nsga2Runner;
use crate::observer::{RunObserver, RunSummary, TracingObserver};
use crate::ordering::aggregate::{round3, Aggregation, ResultAggregator, SolutionRecord};
use crate::ordering::objective::ObjectiveEvaluator;
use crate::ordering::problem::TaskOrderProblem;
use crate::ordering::request::{OptimizeRequest, RunParameters};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Algorithm label of a normal run.
pub const ALGORITHM: &str = "NSGA-II";

/// Algorithm label when the weighted-priority fallback produced the result.
pub const FALLBACK_ALGORITHM: &str = "weighted_priority_fallback";

/// Outcome of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub algorithm: String,
    pub parameters: RunParameters,
    /// Best first.
    pub solutions: Vec<SolutionRecord>,
    /// Distinct orders in the final population, before the cap.
    pub total_solutions: usize,
    pub best_solution: SolutionRecord,
    pub total_tasks: usize,
    pub generations: usize,
    pub execution_time_ms: f64,
}

/// Orders tasks with NSGA-II.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use task_nsga::model::Task;
/// use task_nsga::ordering::{OptimizeRequest, TaskOptimizer};
///
/// let tasks = vec![
///     Task::new(1, "write draft").with_importance(5),
///     Task::new(2, "send draft").depends_on(1),
/// ];
/// let request = OptimizeRequest::new(tasks)
///     .with_run_start(Utc.with_ymd_and_hms(2025, 7, 20, 9, 0, 0).unwrap());
///
/// let result = TaskOptimizer::new().optimize(&request).unwrap();
/// assert_eq!(result.total_tasks, 2);
/// assert_eq!(result.best_solution.task_order[0].id, 1);
/// ```
#[derive(Clone)]
pub struct TaskOptimizer {
    observer: Arc<dyn RunObserver>,
}

impl Default for TaskOptimizer {
    fn default() -> Self {
        Self::with_observer(Arc::new(TracingObserver))
    }
}

impl TaskOptimizer {
    /// Optimizer reporting through `tracing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Optimizer reporting to `observer`.
    pub fn with_observer(observer: Arc<dyn RunObserver>) -> Self {
        Self { observer }
    }

    /// Runs one optimization.
    ///
    /// # Errors
    /// - [`OptimizeError::EmptyTaskList`] when `request.tasks` is empty
    /// - [`OptimizeError::InvalidConfig`] for bad weights or engine parameters
    /// - [`OptimizeError::Search`] when the search itself fails
    ///
    /// A failure while building solution records is not an error: the
    /// weighted-priority order is returned instead.
    pub fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizationResult> {
        let started = Instant::now();
        if request.tasks.is_empty() {
            return Err(OptimizeError::EmptyTaskList);
        }
        let weights = request.weights();
        weights.validate().map_err(OptimizeError::InvalidConfig)?;

        let observer = self.observer.as_ref();
        let config = request.engine_config();
        let run_start = request.run_start.unwrap_or_else(Utc::now);

        let evaluator = ObjectiveEvaluator::new(&request.tasks, &weights, run_start, observer);
        let problem = TaskOrderProblem::new(&evaluator, observer);
        let run = Nsga2Runner::run(&problem, &config)?;

        let aggregator = ResultAggregator::new(&request.tasks, &evaluator, request.max_solutions);
        let (algorithm, aggregation) = match aggregator.aggregate(&run.population) {
            Ok(aggregation) => (ALGORITHM, aggregation),
            Err(err) => {
                observer.fallback_used(&err.to_string());
                (FALLBACK_ALGORITHM, aggregator.fallback())
            }
        };
        let Aggregation {
            best,
            solutions,
            total_solutions,
        } = aggregation;

        let execution_time_ms = round3(started.elapsed().as_secs_f64() * 1000.0);
        observer.run_completed(&RunSummary {
            algorithm: algorithm.to_string(),
            task_count: request.tasks.len(),
            generations: run.generations,
            distinct_solutions: total_solutions,
            best_total_score: best.objectives.total_score,
            elapsed_ms: execution_time_ms,
        });

        Ok(OptimizationResult {
            algorithm: algorithm.to_string(),
            parameters: RunParameters {
                pop_size: config.population_size,
                n_gen: config.max_generations,
                seed: run.seed,
                weights,
                max_solutions: aggregator.limit(),
            },
            solutions,
            total_solutions,
            best_solution: best,
            total_tasks: request.tasks.len(),
            generations: run.generations,
            execution_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, WeightConfig};
    use crate::observer::testing::RecordingObserver;
    use chrono::TimeZone;

    fn request(tasks: Vec<Task>) -> OptimizeRequest {
        OptimizeRequest::new(tasks)
            .with_run_start(Utc.with_ymd_and_hms(2025, 7, 20, 9, 0, 0).unwrap())
            .with_parallel(false)
    }

    fn optimizer(observer: &Arc<RecordingObserver>) -> TaskOptimizer {
        TaskOptimizer::with_observer(observer.clone())
    }

    #[test]
    fn test_empty_task_list_rejected() {
        let err = TaskOptimizer::new().optimize(&request(Vec::new())).unwrap_err();
        assert_eq!(err, OptimizeError::EmptyTaskList);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = WeightConfig {
            urgency: -1.0,
            ..WeightConfig::default()
        };
        let req = request(vec![Task::new(1, "a")]).with_weights(weights);
        let err = TaskOptimizer::new().optimize(&req).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn test_oversized_run_rejected() {
        let huge_gen = request(vec![Task::new(1, "a")]).with_n_gen(usize::MAX);
        let err = TaskOptimizer::new().optimize(&huge_gen).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidConfig(_)), "{err}");

        let huge_pop = request(vec![Task::new(1, "a")]).with_pop_size(usize::MAX);
        let err = TaskOptimizer::new().optimize(&huge_pop).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn test_invalid_engine_override_rejected() {
        let req = request(vec![Task::new(1, "a")]).with_pop_size(1);
        let err = TaskOptimizer::new().optimize(&req).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn test_single_task() {
        let result = TaskOptimizer::new()
            .optimize(&request(vec![Task::new(7, "only")]))
            .unwrap();
        assert_eq!(result.algorithm, ALGORITHM);
        assert_eq!(result.total_solutions, 1);
        assert_eq!(result.solutions.len(), 1);
        assert_eq!(result.best_solution.task_order[0].id, 7);
        assert_eq!(result.best_solution.task_order[0].position, 1);
    }

    #[test]
    fn test_parameters_reported() {
        let tasks: Vec<Task> = (1..=4).map(|i| Task::new(i, format!("t{i}"))).collect();
        let req = request(tasks).with_seed(11).with_max_solutions(25);
        let result = TaskOptimizer::new().optimize(&req).unwrap();

        assert_eq!(result.parameters.pop_size, 40);
        assert_eq!(result.parameters.n_gen, 40);
        assert_eq!(result.parameters.seed, 11);
        assert_eq!(result.parameters.max_solutions, 10);
        assert_eq!(result.parameters.weights, WeightConfig::default());
        assert_eq!(result.generations, 40);
        assert!(result.solutions.len() <= 10);
        assert!(result.total_solutions >= result.solutions.len());
        assert_eq!(result.best_solution, result.solutions[0]);
    }

    #[test]
    fn test_observer_sees_generations_and_completion() {
        let observer = Arc::new(RecordingObserver::default());
        let req = request(vec![Task::new(1, "a"), Task::new(2, "b")]).with_n_gen(3);
        optimizer(&observer).optimize(&req).unwrap();

        assert_eq!(
            observer.events(),
            vec!["generation:1", "generation:2", "generation:3", "completed:NSGA-II"]
        );
    }

    #[test]
    fn test_invalid_deadline_reported_not_fatal() {
        let observer = Arc::new(RecordingObserver::default());
        let req = request(vec![Task::new(1, "a").with_deadline("someday")]).with_n_gen(1);
        let result = optimizer(&observer).optimize(&req).unwrap();

        assert_eq!(result.best_solution.objectives.constraint_violation, 1.0);
        assert_eq!(observer.events()[0], "invalid_deadline:1:someday");
    }

    #[test]
    fn test_non_finite_scores_fall_back() {
        let observer = Arc::new(RecordingObserver::default());
        let weights = WeightConfig {
            importance: f64::MAX,
            ..WeightConfig::default()
        };
        let tasks = vec![
            Task::new(1, "a").with_importance(1),
            Task::new(2, "b").with_importance(5),
        ];
        let req = request(tasks).with_weights(weights).with_n_gen(2);
        let result = optimizer(&observer).optimize(&req).unwrap();

        assert_eq!(result.algorithm, FALLBACK_ALGORITHM);
        assert_eq!(result.total_solutions, 1);
        assert_eq!(result.best_solution.task_order[0].id, 2);
        let events = observer.events();
        assert!(events.iter().any(|e| e.starts_with("fallback:")), "{events:?}");
        assert_eq!(events.last().map(String::as_str), Some("completed:weighted_priority_fallback"));
    }
}
