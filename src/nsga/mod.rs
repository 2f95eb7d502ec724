//! NSGA-II multi-objective evolutionary engine.
//!
//! A generic, domain-agnostic implementation of the elitist non-dominated
//! sorting genetic algorithm over real-valued genomes. Users define their
//! problem by implementing [`MultiObjectiveProblem`].
//!
//! # Key Types
//!
//! - [`Nsga2Config`]: Algorithm parameters (population, generations, operator indices)
//! - [`Nsga2Runner`]: Executes the evolutionary loop
//! - [`Nsga2Result`]: Final ranked population
//! - [`Candidate`]: Genome with objectives, rank and crowding distance
//!
//! # Submodules
//!
//! - [`multi_objective`]: Dominance, non-dominated sorting, crowding distance
//! - [`operators`]: Simulated binary crossover and polynomial mutation
//! - [`selection`]: Binary crowded tournament
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Deb (2001), *Multi-Objective Optimization Using Evolutionary Algorithms*

mod config;
pub mod multi_objective;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::Nsga2Config;
pub use runner::{environmental_selection, Nsga2Result, Nsga2Runner};
pub use types::{Candidate, MultiObjectiveProblem};
