//! Parent selection for NSGA-II.
//!
//! # References
//!
//! - Deb et al. (2002), crowded-comparison operator
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Candidate;
use rand::Rng;

/// Binary tournament under the crowded-comparison operator.
///
/// Two members are picked uniformly at random (with replacement). The one
/// with the lower rank wins; on a rank tie the larger crowding distance
/// wins; a full tie keeps the first pick.
///
/// # Panics
/// Panics if `population` is empty.
pub fn binary_tournament<R: Rng>(population: &[Candidate], rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let n = population.len();
    let first = rng.random_range(0..n);
    let second = rng.random_range(0..n);

    if population[second].crowded_better_than(&population[first]) {
        second
    } else {
        first
    }
}
