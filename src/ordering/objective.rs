//! Objective evaluation for task orders.
//!
//! Three objectives score an order:
//!
//! - **priority** (maximize): weighted importance/urgency/difficulty,
//!   discounted by `1 / (position + 1)`
//! - **efficiency** (maximize): weighted energy/time/ease efficiency,
//!   discounted the same way
//! - **violation** (minimize): dependency inversions plus deadline overruns
//!
//! Everything that does not depend on the position (per-task scores,
//! deadline offsets, dependency pairs) is computed once in
//! [`ObjectiveEvaluator::new`], so evaluating an order is a pure O(n + d)
//! pass.

use crate::model::{Task, TaskId, WeightConfig};
use crate::observer::RunObserver;
use crate::ordering::encoding::positions;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::collections::HashMap;

/// Penalty per dependency whose prerequisite is scheduled later.
pub const DEPENDENCY_PENALTY: f64 = 10.0;

/// Penalty per hour a task finishes past its deadline.
pub const DEADLINE_PENALTY_PER_HOUR: f64 = 2.0;

/// Upper bound of the deadline penalty for a single task.
pub const MAX_DEADLINE_PENALTY: f64 = 20.0;

/// Flat penalty for a deadline that could not be parsed.
pub const INVALID_DEADLINE_PENALTY: f64 = 1.0;

/// Human-readable objective values of one order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objectives {
    pub priority: f64,
    pub efficiency: f64,
    pub violation: f64,
}

impl Objectives {
    /// Scalarized score used to rank final solutions.
    pub fn total(&self) -> f64 {
        self.priority + self.efficiency - self.violation
    }

    /// Objective vector for minimization: `[-priority, -efficiency, violation]`.
    pub fn to_minimization(&self) -> Vec<f64> {
        vec![-self.priority, -self.efficiency, self.violation]
    }
}

/// A task deadline resolved against the run start.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Deadline {
    Absent,
    /// Hours after the run start; negative when already past.
    DueIn(f64),
    Unparseable,
}

/// Scores task orders for one optimization run.
#[derive(Debug, Clone)]
pub struct ObjectiveEvaluator {
    priority_scores: Vec<f64>,
    efficiency_scores: Vec<f64>,
    duration_hours: Vec<f64>,
    deadlines: Vec<Deadline>,
    /// `(dependent, prerequisite)` index pairs.
    dependency_pairs: Vec<(usize, usize)>,
}

impl ObjectiveEvaluator {
    /// Prepares an evaluator for `tasks`.
    ///
    /// Deadlines are resolved relative to `run_start`; each unparseable one
    /// is reported to `observer` once.
    pub fn new(
        tasks: &[Task],
        weights: &WeightConfig,
        run_start: DateTime<Utc>,
        observer: &dyn RunObserver,
    ) -> Self {
        let index_of: HashMap<TaskId, usize> =
            tasks.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

        let mut dependency_pairs = Vec::new();
        for (i, task) in tasks.iter().enumerate() {
            for dep in &task.dependencies {
                match index_of.get(dep) {
                    Some(&j) if j != i => dependency_pairs.push((i, j)),
                    _ => {}
                }
            }
        }

        let deadlines = tasks
            .iter()
            .map(|task| match task.deadline.as_deref() {
                None => Deadline::Absent,
                Some(raw) if raw.trim().is_empty() => Deadline::Absent,
                Some(raw) => match parse_deadline(raw) {
                    Some(due) => {
                        let offset = due.signed_duration_since(run_start);
                        Deadline::DueIn(offset.num_milliseconds() as f64 / 3_600_000.0)
                    }
                    None => {
                        observer.invalid_deadline(task.id, raw);
                        Deadline::Unparseable
                    }
                },
            })
            .collect();

        Self {
            priority_scores: tasks.iter().map(|t| priority_score(t, weights)).collect(),
            efficiency_scores: tasks.iter().map(|t| efficiency_score(t, weights)).collect(),
            duration_hours: tasks.iter().map(|t| f64::from(t.duration) / 60.0).collect(),
            deadlines,
            dependency_pairs,
        }
    }

    /// Number of tasks this evaluator scores.
    pub fn task_count(&self) -> usize {
        self.priority_scores.len()
    }

    /// Scores an order given as task indices.
    ///
    /// # Panics
    /// Panics if `order` is not a permutation of `0..task_count()`.
    pub fn evaluate(&self, order: &[usize]) -> Objectives {
        assert_eq!(
            order.len(),
            self.task_count(),
            "order length must equal the task count"
        );
        Objectives {
            priority: discounted_sum(order, &self.priority_scores),
            efficiency: discounted_sum(order, &self.efficiency_scores),
            violation: self.violation(order),
        }
    }

    /// Total constraint violation of `order`.
    pub fn violation(&self, order: &[usize]) -> f64 {
        let pos = positions(order);

        let dependency: f64 = self
            .dependency_pairs
            .iter()
            .filter(|&&(dependent, prerequisite)| pos[prerequisite] > pos[dependent])
            .count() as f64
            * DEPENDENCY_PENALTY;

        let mut clock = 0.0;
        let mut deadline = 0.0;
        for &task in order {
            clock += self.duration_hours[task];
            match self.deadlines[task] {
                Deadline::Absent => {}
                Deadline::DueIn(due) => {
                    if clock > due {
                        deadline +=
                            ((clock - due) * DEADLINE_PENALTY_PER_HOUR).min(MAX_DEADLINE_PENALTY);
                    }
                }
                Deadline::Unparseable => deadline += INVALID_DEADLINE_PENALTY,
            }
        }

        dependency + deadline
    }

    /// Position-independent priority score of each task.
    pub fn priority_scores(&self) -> &[f64] {
        &self.priority_scores
    }
}

/// `importance·w_importance + urgency·w_urgency + (6 − ease)·w_ease`.
pub fn priority_score(task: &Task, weights: &WeightConfig) -> f64 {
    f64::from(task.importance) * weights.importance
        + f64::from(task.urgency) * weights.urgency
        + (6.0 - f64::from(task.ease)) * weights.ease
}

/// Weighted energy, time and ease efficiency of a task.
pub fn efficiency_score(task: &Task, weights: &WeightConfig) -> f64 {
    let energy_efficiency = (11.0 - f64::from(task.energy_required)) / 10.0;
    let time_efficiency = 1.0 / (f64::from(task.duration) / 60.0 + 1.0);
    let ease_efficiency = f64::from(task.ease) / 5.0;
    energy_efficiency * weights.energy + time_efficiency * weights.time + ease_efficiency * weights.ease
}

fn discounted_sum(order: &[usize], scores: &[f64]) -> f64 {
    order
        .iter()
        .enumerate()
        .map(|(p, &task)| scores[task] / (p as f64 + 1.0))
        .sum()
}

/// Parses an ISO-8601 deadline.
///
/// Accepts RFC 3339 (`2025-07-20T18:00:00Z`, `...+09:00`), naive date-times
/// read as UTC (`2025-07-20T18:00:00`, `2025-07-20 18:00`), and plain dates
/// read as midnight UTC.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
