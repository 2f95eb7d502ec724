//! Real-coded genetic operators.
//!
//! Both operators work per gene on `&[f64]` genomes inside inclusive bounds
//! and never produce values outside them.
//!
//! # Crossover
//!
//! - [`sbx_crossover`]: Simulated Binary Crossover, bounded variant
//!
//! # Mutation
//!
//! - [`polynomial_mutation`]: Bounded polynomial mutation
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS) for
//!   Engineering Design"
//! - Deb et al. (2002), NSGA-II reference implementation

use rand::Rng;

/// Genes closer than this are treated as identical by SBX.
const GENE_EPSILON: f64 = 1e-14;

/// Probability that SBX recombines any single gene pair.
const SBX_GENE_PROB: f64 = 0.5;

/// Simulated Binary Crossover (SBX), bounded.
///
/// Each gene pair is recombined with probability 0.5. The spread of the
/// children around the parents is controlled by the distribution index
/// `eta`: large values keep children close to their parents.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn sbx_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    eta: f64,
    bounds: (f64, f64),
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );

    let (lower, upper) = bounds;
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    for i in 0..parent1.len() {
        if rng.random::<f64>() > SBX_GENE_PROB {
            continue;
        }
        let (x1, x2) = (parent1[i], parent2[i]);
        if (x1 - x2).abs() <= GENE_EPSILON {
            continue;
        }

        let (y1, y2) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
        let span = y2 - y1;
        let u: f64 = rng.random();

        let beta_low = 1.0 + 2.0 * (y1 - lower) / span;
        let c1 = 0.5 * ((y1 + y2) - spread_factor(beta_low, eta, u) * span);

        let beta_high = 1.0 + 2.0 * (upper - y2) / span;
        let c2 = 0.5 * ((y1 + y2) + spread_factor(beta_high, eta, u) * span);

        let c1 = c1.clamp(lower, upper);
        let c2 = c2.clamp(lower, upper);

        if rng.random_bool(0.5) {
            child1[i] = c2;
            child2[i] = c1;
        } else {
            child1[i] = c1;
            child2[i] = c2;
        }
    }

    (child1, child2)
}

/// Spread factor `beta_q` of bounded SBX for a boundary distance `beta`.
fn spread_factor(beta: f64, eta: f64, u: f64) -> f64 {
    let exponent = 1.0 / (eta + 1.0);
    let alpha = 2.0 - beta.powf(-(eta + 1.0));
    if u <= 1.0 / alpha {
        (u * alpha).powf(exponent)
    } else {
        (1.0 / (2.0 - u * alpha)).powf(exponent)
    }
}

/// Bounded polynomial mutation.
///
/// Each gene is perturbed with probability `gene_prob`. The perturbation is
/// drawn from a polynomial distribution with index `eta` scaled so the
/// result stays inside `bounds`.
///
/// # Complexity
/// O(n)
pub fn polynomial_mutation<R: Rng>(
    genes: &mut [f64],
    eta: f64,
    gene_prob: f64,
    bounds: (f64, f64),
    rng: &mut R,
) {
    let (lower, upper) = bounds;
    let range = upper - lower;
    if range <= 0.0 {
        return;
    }
    let gene_prob = gene_prob.clamp(0.0, 1.0);
    let exponent = 1.0 / (eta + 1.0);

    for gene in genes.iter_mut() {
        if !rng.random_bool(gene_prob) {
            continue;
        }

        let y = gene.clamp(lower, upper);
        let delta1 = (y - lower) / range;
        let delta2 = (upper - y) / range;
        let u: f64 = rng.random();

        let delta_q = if u < 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(exponent) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(exponent)
        };

        *gene = (y + delta_q * range).clamp(lower, upper);
    }
}

// ============================================================================
// Tests
// ============================================================================
