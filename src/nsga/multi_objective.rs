//! Pareto dominance, non-dominated sorting and crowding distance.
//!
//! All objectives are **minimized**. Maximization objectives are negated by
//! the problem before they reach this module.
//!
//! # Algorithms
//!
//! - [`dominates`]: Pareto dominance test
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: Crowding distance assignment within one front
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

/// Fronts produced by [`non_dominated_sort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParetoFronts {
    /// `ranks[i]` is the front index of solution `i`.
    pub ranks: Vec<usize>,

    /// Solution indices per front, best front first, ascending within a front.
    pub fronts: Vec<Vec<usize>>,
}

impl ParetoFronts {
    /// Indices of the non-dominated solutions.
    pub fn first(&self) -> &[usize] {
        self.fronts.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Returns `true` when `a` Pareto-dominates `b`.
///
/// `a` dominates `b` iff it is no worse on every objective and strictly
/// better on at least one.
///
/// ```
/// use task_nsga::nsga::multi_objective::dominates;
///
/// assert!(dominates(&[1.0, 2.0, 3.0], &[1.0, 2.0, 4.0]));
/// assert!(!dominates(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]));
/// assert!(!dominates(&[1.0, 5.0], &[5.0, 1.0]));
/// ```
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        strictly_better |= x < y;
    }
    strictly_better
}

/// Fast non-dominated sorting.
///
/// Peels the population into fronts: front 0 holds every solution no other
/// solution dominates, front `k + 1` holds those dominated only by members
/// of fronts `0..=k`.
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use task_nsga::nsga::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // A
///     vec![3.0, 3.0],  // B
///     vec![5.0, 1.0],  // C
///     vec![4.0, 4.0],  // D, dominated by B
/// ];
///
/// let sorted = non_dominated_sort(&objectives);
/// assert_eq!(sorted.ranks, vec![0, 0, 0, 1]);
/// assert_eq!(sorted.first(), &[0, 1, 2]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> ParetoFronts {
    let n = objectives.len();
    debug_assert!(
        objectives.windows(2).all(|w| w[0].len() == w[1].len()),
        "objective vectors must share one length"
    );

    // dominated[i]: solutions i dominates; remaining[j]: solutions dominating j
    let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut remaining = vec![0usize; n];
    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&objectives[i], &objectives[j]) {
                dominated[i].push(j);
                remaining[j] += 1;
            } else if dominates(&objectives[j], &objectives[i]) {
                dominated[j].push(i);
                remaining[i] += 1;
            }
        }
    }

    let mut ranks = vec![0usize; n];
    let mut fronts = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| remaining[i] == 0).collect();

    while !current.is_empty() {
        let rank = fronts.len();
        let mut next = Vec::new();
        for &i in &current {
            ranks[i] = rank;
            for &j in &dominated[i] {
                remaining[j] -= 1;
                if remaining[j] == 0 {
                    next.push(j);
                }
            }
        }
        fronts.push(current);
        current = next;
    }

    ParetoFronts { ranks, fronts }
}

/// Crowding distance of each member of one front.
///
/// For every objective the members are ordered by value; the two ends get
/// `f64::INFINITY` and each interior member adds the normalized gap between
/// its neighbours. Objectives whose spread is zero or non-finite add
/// nothing. Fronts of two or fewer members are entirely infinite.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use task_nsga::nsga::multi_objective::crowding_distance;
///
/// let front = vec![vec![0.0, 6.0], vec![2.0, 3.0], vec![6.0, 0.0]];
/// let d = crowding_distance(&front);
///
/// assert!(d[0].is_infinite() && d[2].is_infinite());
/// assert_eq!(d[1], 2.0);
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let mut distances = vec![0.0f64; n];
    for k in 0..objectives[0].len() {
        let value = |i: usize| objectives[i][k];
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

        let (lowest, highest) = (order[0], order[n - 1]);
        distances[lowest] = f64::INFINITY;
        distances[highest] = f64::INFINITY;

        let span = value(highest) - value(lowest);
        if !(span.is_finite() && span > 0.0) {
            continue;
        }
        for w in order.windows(3) {
            distances[w[1]] += (value(w[2]) - value(w[0])) / span;
        }
    }

    distances
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Dominance ----

    #[test]
    fn test_dominates_strict_in_one() {
        assert!(dominates(&[-5.0, -3.0, 0.0], &[-5.0, -3.0, 10.0]));
        assert!(!dominates(&[-5.0, -3.0, 10.0], &[-5.0, -3.0, 0.0]));
    }

    #[test]
    fn test_equal_vectors_do_not_dominate() {
        let a = [-1.0, -2.0, 3.0];
        assert!(!dominates(&a, &a));
    }

    #[test]
    fn test_trade_off_is_mutual_non_dominance() {
        let a = [-10.0, -1.0, 0.0];
        let b = [-1.0, -10.0, 0.0];
        assert!(!dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    // ---- Non-dominated sort ----

    #[test]
    fn test_lone_solution_is_front_zero() {
        let sorted = non_dominated_sort(&[vec![1.0, 2.0, 3.0]]);
        assert_eq!(sorted.ranks, vec![0]);
        assert_eq!(sorted.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_empty_input_has_no_fronts() {
        let sorted = non_dominated_sort(&[]);
        assert!(sorted.ranks.is_empty());
        assert!(sorted.first().is_empty());
    }

    #[test]
    fn test_clear_dominance_chain() {
        let objs = vec![
            vec![3.0, 3.0, 3.0],
            vec![2.0, 2.0, 2.0],
            vec![1.0, 1.0, 1.0],
        ];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![2, 1, 0]);
        assert_eq!(result.fronts, vec![vec![2], vec![1], vec![0]]);
        assert_eq!(result.first(), &[2]);
    }

    #[test]
    fn test_dominated_by_later_index() {
        let objs = vec![
            vec![2.0, 2.0, 2.0],
            vec![0.0, 5.0, 5.0],
            vec![1.0, 1.0, 1.0],
        ];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![1, 0, 0]);
        assert_eq!(result.fronts[0], vec![1, 2]);
        assert_eq!(result.fronts[1], vec![0]);
    }

    #[test]
    fn test_three_layers() {
        let sorted = non_dominated_sort(&[
            vec![0.0, 6.0],
            vec![6.0, 6.0],
            vec![3.0, 3.0],
            vec![6.0, 0.0],
            vec![4.0, 5.0],
        ]);
        assert_eq!(sorted.ranks, vec![0, 2, 0, 0, 1]);
        assert_eq!(sorted.fronts, vec![vec![0, 2, 3], vec![4], vec![1]]);
    }

    #[test]
    fn test_identical_vectors_share_front() {
        let sorted = non_dominated_sort(&vec![vec![2.0, 2.0, 2.0]; 4]);
        assert_eq!(sorted.fronts, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_fronts_partition_all_indices() {
        let objs = vec![
            vec![1.0, 5.0, 3.0],
            vec![3.0, 1.0, 5.0],
            vec![5.0, 3.0, 1.0],
            vec![6.0, 6.0, 6.0],
            vec![7.0, 7.0, 7.0],
        ];
        let result = non_dominated_sort(&objs);
        let mut seen: Vec<usize> = result.fronts.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    // ---- Crowding distance ----

    #[test]
    fn test_crowding_two_members_infinite() {
        let dist = crowding_distance(&[vec![1.0, 3.0], vec![3.0, 1.0]]);
        assert!(dist.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_crowding_evenly_spaced() {
        let objs = vec![
            vec![0.0, 4.0, 0.0],
            vec![1.0, 3.0, 0.0],
            vec![2.0, 2.0, 0.0],
            vec![3.0, 1.0, 0.0],
            vec![4.0, 0.0, 0.0],
        ];
        let dist = crowding_distance(&objs);

        assert!(dist[0].is_infinite());
        assert!(dist[4].is_infinite());
        // Two objectives each contribute 2/4; the constant third adds nothing.
        for &d in &dist[1..4] {
            assert!((d - 1.0).abs() < 1e-10, "expected 1.0, got {d}");
        }
    }

    #[test]
    fn test_crowding_extremes_per_objective() {
        // Member 1 is only extreme on the third objective.
        let objs = vec![
            vec![0.0, 0.0, 5.0],
            vec![1.0, 1.0, 9.0],
            vec![2.0, 2.0, 6.0],
            vec![3.0, 3.0, 7.0],
        ];
        let dist = crowding_distance(&objs);
        assert!(dist[0].is_infinite());
        assert!(dist[1].is_infinite());
        assert!(dist[3].is_infinite());
        assert!(dist[2].is_finite());
    }

    #[test]
    fn test_crowding_zero_range_objective() {
        let objs = vec![vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]];
        let dist = crowding_distance(&objs);
        assert!(dist[1].is_finite());
        assert!((dist[1] - 1.0).abs() < 1e-10);
    }
}
