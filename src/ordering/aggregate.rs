//! Result aggregation.
//!
//! Turns the final population into ranked, deduplicated solution records.
//! Scores stay at full precision until [`ResultAggregator`] converts them
//! into [`SolutionRecord`]s, which hold plain `f64`s rounded to three
//! decimals.

use crate::model::{Task, TaskId};
use crate::nsga::Candidate;
use crate::ordering::encoding::decode;
use crate::ordering::objective::{ObjectiveEvaluator, Objectives};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Most solutions ever returned, regardless of the requested count.
pub const MAX_SOLUTIONS: usize = 10;

/// Why the final population could not be turned into records.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AggregateError {
    #[error("final population is empty")]
    EmptyPopulation,

    #[error("decoded order is empty")]
    EmptyOrder,

    #[error("individual {index} has {found} genes, expected {expected}")]
    MalformedIndividual {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("individual {index} has a non-finite total score")]
    NonFiniteScore { index: usize },
}

/// One task in a solution, with its 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPosition {
    pub id: TaskId,
    pub title: String,
    pub position: usize,
}

/// Reported scores of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolutionObjectives {
    pub priority_score: f64,
    pub efficiency_score: f64,
    pub constraint_violation: f64,
    pub total_score: f64,
}

/// Order-independent figures of the task set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolutionMetrics {
    /// Minutes.
    pub total_duration: u64,
    pub total_energy: u64,
    pub avg_importance: f64,
    pub avg_urgency: f64,
}

/// A ranked task order as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    /// 1-based rank by total score.
    pub solution_id: usize,
    pub task_order: Vec<TaskPosition>,
    pub objectives: SolutionObjectives,
    pub metrics: SolutionMetrics,
}

/// Aggregated solutions, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub best: SolutionRecord,
    pub solutions: Vec<SolutionRecord>,
    /// Distinct orders found, before the cap.
    pub total_solutions: usize,
}

#[derive(Debug, Clone)]
struct ScoredOrder {
    order: Vec<usize>,
    objectives: Objectives,
    total: f64,
}

/// Builds solution records for one run.
pub struct ResultAggregator<'a> {
    tasks: &'a [Task],
    evaluator: &'a ObjectiveEvaluator,
    limit: usize,
}

impl<'a> ResultAggregator<'a> {
    /// `max_solutions` is clamped to `1..=MAX_SOLUTIONS`.
    pub fn new(tasks: &'a [Task], evaluator: &'a ObjectiveEvaluator, max_solutions: usize) -> Self {
        Self {
            tasks,
            evaluator,
            limit: max_solutions.clamp(1, MAX_SOLUTIONS),
        }
    }

    /// Number of records [`aggregate`](Self::aggregate) returns at most.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Scores every candidate, sorts by descending total and drops
    /// duplicate orders.
    pub fn aggregate(&self, population: &[Candidate]) -> Result<Aggregation, AggregateError> {
        if population.is_empty() {
            return Err(AggregateError::EmptyPopulation);
        }
        let expected = self.evaluator.task_count();
        if expected == 0 {
            return Err(AggregateError::EmptyOrder);
        }

        let mut scored = Vec::with_capacity(population.len());
        for (index, candidate) in population.iter().enumerate() {
            if candidate.genes.len() != expected {
                return Err(AggregateError::MalformedIndividual {
                    index,
                    expected,
                    found: candidate.genes.len(),
                });
            }
            let order = decode(&candidate.genes);
            let objectives = self.evaluator.evaluate(&order);
            let total = objectives.total();
            if !total.is_finite() {
                return Err(AggregateError::NonFiniteScore { index });
            }
            scored.push(ScoredOrder {
                order,
                objectives,
                total,
            });
        }

        scored.sort_by(|a, b| b.total.total_cmp(&a.total));
        let mut seen = HashSet::new();
        scored.retain(|s| seen.insert(s.order.clone()));
        let total_solutions = scored.len();

        let metrics = self.metrics();
        let solutions: Vec<SolutionRecord> = scored
            .iter()
            .take(self.limit)
            .enumerate()
            .map(|(i, s)| self.to_record(i + 1, s, metrics))
            .collect();
        let best = solutions
            .first()
            .cloned()
            .ok_or(AggregateError::EmptyPopulation)?;

        Ok(Aggregation {
            best,
            solutions,
            total_solutions,
        })
    }

    /// Single deterministic solution: tasks by descending weighted priority.
    ///
    /// Efficiency and violation are reported as zero and the total equals
    /// the undiscounted sum of priority scores.
    pub fn fallback(&self) -> Aggregation {
        let scores = self.evaluator.priority_scores();
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        let priority: f64 = scores.iter().sum();
        let scored = ScoredOrder {
            order,
            objectives: Objectives {
                priority,
                efficiency: 0.0,
                violation: 0.0,
            },
            total: priority,
        };
        let best = self.to_record(1, &scored, self.metrics());

        Aggregation {
            solutions: vec![best.clone()],
            best,
            total_solutions: 1,
        }
    }

    fn to_record(&self, solution_id: usize, scored: &ScoredOrder, metrics: SolutionMetrics) -> SolutionRecord {
        let task_order = scored
            .order
            .iter()
            .enumerate()
            .map(|(p, &i)| TaskPosition {
                id: self.tasks[i].id,
                title: self.tasks[i].title.clone(),
                position: p + 1,
            })
            .collect();

        SolutionRecord {
            solution_id,
            task_order,
            objectives: SolutionObjectives {
                priority_score: round3(scored.objectives.priority),
                efficiency_score: round3(scored.objectives.efficiency),
                constraint_violation: round3(scored.objectives.violation),
                total_score: round3(scored.total),
            },
            metrics,
        }
    }

    fn metrics(&self) -> SolutionMetrics {
        let n = self.tasks.len();
        let mean = |f: fn(&Task) -> u8| {
            if n == 0 {
                0.0
            } else {
                round3(self.tasks.iter().map(|t| f64::from(f(t))).sum::<f64>() / n as f64)
            }
        };
        SolutionMetrics {
            total_duration: self.tasks.iter().map(|t| u64::from(t.duration)).sum(),
            total_energy: self.tasks.iter().map(|t| u64::from(t.energy_required)).sum(),
            avg_importance: mean(|t| t.importance),
            avg_urgency: mean(|t| t.urgency),
        }
    }
}

/// Rounds to three decimals; negative zero becomes zero.
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0 + 0.0
}
