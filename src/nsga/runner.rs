//! NSGA-II evolutionary loop execution.
//!
//! [`Nsga2Runner`] orchestrates the complete process:
//! initialization → evaluation → ranking → tournament → SBX → mutation →
//! environmental selection → repeat.

use super::config::Nsga2Config;
use super::multi_objective::{crowding_distance, non_dominated_sort};
use super::operators::{polynomial_mutation, sbx_crossover};
use super::selection::binary_tournament;
use super::types::{Candidate, MultiObjectiveProblem};
use crate::error::{OptimizeError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of an NSGA-II run.
#[derive(Debug, Clone)]
pub struct Nsga2Result {
    /// Final population, ranked and crowded. Rank-0 members form the
    /// approximated Pareto front.
    pub population: Vec<Candidate>,

    /// Number of generations executed.
    pub generations: usize,

    /// Seed the run's RNG was created from.
    pub seed: u64,

    /// Size of the non-dominated front after initialization and after each
    /// generation.
    pub front_size_history: Vec<usize>,
}

impl Nsga2Result {
    /// Members of the final non-dominated front.
    pub fn pareto_front(&self) -> Vec<&Candidate> {
        self.population.iter().filter(|c| c.rank == 0).collect()
    }
}

/// Executes the NSGA-II evolutionary loop.
///
/// # Usage
///
/// ```
/// use task_nsga::nsga::{MultiObjectiveProblem, Nsga2Config, Nsga2Runner};
///
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
///
/// let config = Nsga2Config::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42);
/// let result = Nsga2Runner::run(&Schaffer, &config).unwrap();
/// assert_eq!(result.population.len(), 20);
/// ```
pub struct Nsga2Runner;

impl Nsga2Runner {
    /// Runs NSGA-II.
    ///
    /// Fails with [`OptimizeError::InvalidConfig`] for invalid parameters or
    /// a degenerate problem, and with [`OptimizeError::Search`] when the
    /// problem returns objective vectors of the wrong length.
    pub fn run<P: MultiObjectiveProblem>(problem: &P, config: &Nsga2Config) -> Result<Nsga2Result> {
        config.validate().map_err(OptimizeError::InvalidConfig)?;

        let dimensions = problem.dimensions();
        if dimensions == 0 {
            return Err(OptimizeError::InvalidConfig(
                "problem must have at least one dimension".into(),
            ));
        }
        let bounds = problem.bounds();
        if !(bounds.0.is_finite() && bounds.1.is_finite() && bounds.0 < bounds.1) {
            return Err(OptimizeError::InvalidConfig(format!(
                "invalid gene bounds [{}, {}]",
                bounds.0, bounds.1
            )));
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let pop_size = config.population_size;
        let gene_prob = config.gene_mutation_prob(dimensions);

        // 1. Initialize population
        let mut population: Vec<Candidate> = (0..pop_size)
            .map(|_| {
                let genes = (0..dimensions)
                    .map(|_| rng.random_range(bounds.0..=bounds.1))
                    .collect();
                Candidate::new(genes)
            })
            .collect();

        // 2. Evaluate and rank
        evaluate_population(problem, &mut population, config.parallel)?;
        population = environmental_selection(population, pop_size);

        let mut front_size_history = Vec::with_capacity(config.max_generations + 1);
        front_size_history.push(front_size(&population));

        // 3. Generational loop
        for gen in 0..config.max_generations {
            let mut offspring: Vec<Candidate> = Vec::with_capacity(pop_size);

            while offspring.len() < pop_size {
                let p1 = &population[binary_tournament(&population, &mut rng)];
                let p2 = &population[binary_tournament(&population, &mut rng)];

                let (mut c1, mut c2) = if rng.random_bool(config.crossover_prob) {
                    sbx_crossover(&p1.genes, &p2.genes, config.crossover_eta, bounds, &mut rng)
                } else {
                    (p1.genes.clone(), p2.genes.clone())
                };

                polynomial_mutation(&mut c1, config.mutation_eta, gene_prob, bounds, &mut rng);
                offspring.push(Candidate::new(c1));

                if offspring.len() < pop_size {
                    polynomial_mutation(&mut c2, config.mutation_eta, gene_prob, bounds, &mut rng);
                    offspring.push(Candidate::new(c2));
                }
            }

            evaluate_population(problem, &mut offspring, config.parallel)?;

            population.extend(offspring);
            population = environmental_selection(population, pop_size);

            front_size_history.push(front_size(&population));
            problem.on_generation(gen + 1, &population);
        }

        Ok(Nsga2Result {
            population,
            generations: config.max_generations,
            seed,
            front_size_history,
        })
    }
}

/// Ranks `merged` and keeps the best `target` members.
///
/// Whole fronts are taken in rank order; the first front that does not fit
/// is truncated by descending crowding distance. Every survivor carries the
/// rank and crowding distance computed over `merged`.
pub fn environmental_selection(merged: Vec<Candidate>, target: usize) -> Vec<Candidate> {
    if merged.is_empty() {
        return merged;
    }

    let objectives: Vec<Vec<f64>> = merged.iter().map(|c| c.objectives.clone()).collect();
    let sorted = non_dominated_sort(&objectives);

    let mut slots: Vec<Option<Candidate>> = merged.into_iter().map(Some).collect();
    let mut survivors: Vec<Candidate> = Vec::with_capacity(target);

    for (rank, front) in sorted.fronts.iter().enumerate() {
        if survivors.len() >= target {
            break;
        }

        let front_objectives: Vec<Vec<f64>> =
            front.iter().map(|&i| objectives[i].clone()).collect();
        let distances = crowding_distance(&front_objectives);

        let mut members: Vec<(usize, f64)> = front.iter().copied().zip(distances).collect();
        let remaining = target - survivors.len();
        if members.len() > remaining {
            // Stable: equal distances keep their front order.
            members.sort_by(|a, b| b.1.total_cmp(&a.1));
            members.truncate(remaining);
        }

        for (idx, crowding) in members {
            if let Some(mut candidate) = slots[idx].take() {
                candidate.rank = rank;
                candidate.crowding = crowding;
                survivors.push(candidate);
            }
        }
    }

    survivors
}

fn front_size(population: &[Candidate]) -> usize {
    population.iter().filter(|c| c.rank == 0).count()
}

/// Evaluates every candidate and checks the objective count.
fn evaluate_population<P: MultiObjectiveProblem>(
    problem: &P,
    candidates: &mut [Candidate],
    parallel: bool,
) -> Result<()> {
    evaluate_all(problem, candidates, parallel);

    let expected = problem.objective_count();
    match candidates.iter().find(|c| c.objectives.len() != expected) {
        Some(bad) => Err(OptimizeError::Search(format!(
            "problem returned {} objectives, expected {expected}",
            bad.objectives.len()
        ))),
        None => Ok(()),
    }
}

#[cfg(feature = "parallel")]
fn evaluate_all<P: MultiObjectiveProblem>(problem: &P, candidates: &mut [Candidate], parallel: bool) {
    if parallel {
        candidates.par_iter_mut().for_each(|c| {
            c.objectives = problem.evaluate(&c.genes);
        });
    } else {
        for c in candidates.iter_mut() {
            c.objectives = problem.evaluate(&c.genes);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all<P: MultiObjectiveProblem>(problem: &P, candidates: &mut [Candidate], _parallel: bool) {
    for c in candidates.iter_mut() {
        c.objectives = problem.evaluate(&c.genes);
    }
}

// ============================================================================
// Tests
// ============================================================================
