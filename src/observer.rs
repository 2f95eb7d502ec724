//! Run observation hooks.
//!
//! The optimizer never logs through a global handle. Callers inject a
//! [`RunObserver`]; [`TracingObserver`] forwards events to `tracing`, and
//! [`NoopObserver`] discards them.

use crate::model::TaskId;
use tracing::{debug, info, warn};

/// Receives notable events of an optimization run.
///
/// Every method has a no-op default so implementors override only what
/// they need. Observers are shared across rayon workers, hence `Send + Sync`.
pub trait RunObserver: Send + Sync {
    /// A task deadline could not be parsed. Reported once per task per run.
    fn invalid_deadline(&self, _task_id: TaskId, _raw: &str) {}

    /// A generation finished with `front_size` non-dominated members.
    fn generation_completed(&self, _generation: usize, _front_size: usize) {}

    /// Result construction failed and the weighted-priority order was used.
    fn fallback_used(&self, _reason: &str) {}

    /// The run finished.
    fn run_completed(&self, _summary: &RunSummary) {}
}

/// Figures reported at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub algorithm: String,
    pub task_count: usize,
    pub generations: usize,
    pub distinct_solutions: usize,
    pub best_total_score: f64,
    pub elapsed_ms: f64,
}

/// Emits run events as `tracing` events under the `task_nsga` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn invalid_deadline(&self, task_id: TaskId, raw: &str) {
        warn!(task_id, deadline = raw, "unparseable deadline, applying flat penalty");
    }

    fn generation_completed(&self, generation: usize, front_size: usize) {
        debug!(generation, front_size, "generation completed");
    }

    fn fallback_used(&self, reason: &str) {
        warn!(reason, "falling back to weighted priority order");
    }

    fn run_completed(&self, summary: &RunSummary) {
        info!(
            algorithm = %summary.algorithm,
            tasks = summary.task_count,
            generations = summary.generations,
            solutions = summary.distinct_solutions,
            best_total_score = summary.best_total_score,
            elapsed_ms = summary.elapsed_ms,
            "optimization finished"
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records events as strings for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingObserver {
        pub events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        pub fn events(&self) -> Vec<String> {
            self.events.lock().map(|e| e.clone()).unwrap_or_default()
        }

        fn push(&self, event: String) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }

    impl RunObserver for RecordingObserver {
        fn invalid_deadline(&self, task_id: TaskId, raw: &str) {
            self.push(format!("invalid_deadline:{task_id}:{raw}"));
        }

        fn generation_completed(&self, generation: usize, _front_size: usize) {
            self.push(format!("generation:{generation}"));
        }

        fn fallback_used(&self, reason: &str) {
            self.push(format!("fallback:{reason}"));
        }

        fn run_completed(&self, summary: &RunSummary) {
            self.push(format!("completed:{}", summary.algorithm));
        }
    }
}
