//! Task ordering as an NSGA-II problem.

use crate::nsga::{Candidate, MultiObjectiveProblem};
use crate::observer::RunObserver;
use crate::ordering::encoding::decode;
use crate::ordering::objective::ObjectiveEvaluator;

/// Random-key task ordering with three minimized objectives
/// `[-priority, -efficiency, violation]`.
pub struct TaskOrderProblem<'a> {
    evaluator: &'a ObjectiveEvaluator,
    observer: &'a dyn RunObserver,
}

impl<'a> TaskOrderProblem<'a> {
    pub fn new(evaluator: &'a ObjectiveEvaluator, observer: &'a dyn RunObserver) -> Self {
        Self {
            evaluator,
            observer,
        }
    }
}

impl MultiObjectiveProblem for TaskOrderProblem<'_> {
    fn dimensions(&self) -> usize {
        self.evaluator.task_count()
    }

    fn objective_count(&self) -> usize {
        3
    }

    fn evaluate(&self, genes: &[f64]) -> Vec<f64> {
        self.evaluator.evaluate(&decode(genes)).to_minimization()
    }

    fn on_generation(&self, generation: usize, population: &[Candidate]) {
        let front_size = population.iter().filter(|c| c.rank == 0).count();
        self.observer.generation_completed(generation, front_size);
    }
}
