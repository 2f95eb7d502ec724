//! Core trait definitions for the NSGA-II engine.
//!
//! [`MultiObjectiveProblem`] is the contract between the generic engine and
//! a domain-specific problem. Genomes are real-valued vectors inside fixed
//! bounds; the problem turns a genome into a vector of objective values.

/// A member of the NSGA-II population.
///
/// Carries its genome, its objective vector (all minimized) and the
/// rank/crowding assigned by the last non-dominated sort.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Real-valued genome, one gene per decision variable.
    pub genes: Vec<f64>,

    /// Objective values, lower is better. Empty until evaluated.
    pub objectives: Vec<f64>,

    /// Pareto rank (0 = non-dominated).
    pub rank: usize,

    /// Crowding distance within the candidate's front.
    pub crowding: f64,
}

impl Candidate {
    /// Creates an unevaluated candidate.
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            objectives: Vec::new(),
            rank: usize::MAX,
            crowding: 0.0,
        }
    }

    /// Crowded-comparison operator: lower rank wins, then larger crowding.
    pub fn crowded_better_than(&self, other: &Candidate) -> bool {
        self.rank < other.rank || (self.rank == other.rank && self.crowding > other.crowding)
    }
}

/// Defines a multi-objective problem over real-valued genomes.
///
/// # Thread Safety
///
/// `MultiObjectiveProblem` must be `Send + Sync` because the runner may
/// evaluate candidates in parallel with rayon.
///
/// # Implementing
///
/// ```
/// use task_nsga::nsga::MultiObjectiveProblem;
///
/// /// Schaffer's problem N.1: f1 = x², f2 = (x - 2)².
/// struct Schaffer;
///
/// impl MultiObjectiveProblem for Schaffer {
///     fn dimensions(&self) -> usize { 1 }
///     fn objective_count(&self) -> usize { 2 }
///     fn bounds(&self) -> (f64, f64) { (-10.0, 10.0) }
///     fn evaluate(&self, genes: &[f64]) -> Vec<f64> {
///         let x = genes[0];
///         vec![x * x, (x - 2.0) * (x - 2.0)]
///     }
/// }
/// ```
pub trait MultiObjectiveProblem: Send + Sync {
    /// Number of genes per genome.
    fn dimensions(&self) -> usize;

    /// Number of objective values returned by [`evaluate`](Self::evaluate).
    fn objective_count(&self) -> usize;

    /// Inclusive gene bounds shared by every dimension.
    fn bounds(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    /// Evaluates a genome. Every objective is minimized.
    ///
    /// Must be a pure function of `genes`; the runner may call it
    /// concurrently and in any order.
    fn evaluate(&self, genes: &[f64]) -> Vec<f64>;

    /// Called after each generation's environmental selection.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _population: &[Candidate]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(rank: usize, crowding: f64) -> Candidate {
        Candidate {
            rank,
            crowding,
            ..Candidate::new(vec![0.5])
        }
    }

    #[test]
    fn test_new_candidate_is_unranked() {
        let c = Candidate::new(vec![0.1, 0.2]);
        assert!(c.objectives.is_empty());
        assert_eq!(c.rank, usize::MAX);
    }

    #[test]
    fn test_crowded_comparison() {
        assert!(ranked(0, 0.1).crowded_better_than(&ranked(1, f64::INFINITY)));
        assert!(ranked(1, 2.0).crowded_better_than(&ranked(1, 1.0)));
        assert!(!ranked(1, 1.0).crowded_better_than(&ranked(1, 1.0)));
        assert!(!ranked(2, 9.0).crowded_better_than(&ranked(1, 0.0)));
    }
}
