//! Random-key encoding of task orders.
//!
//! A genome holds one key per task; sorting the task indices by key yields
//! the execution order. Any real vector decodes to a valid permutation, so
//! crossover and mutation never need a repair step.
//!
//! # Reference
//! Bean (1994), "Genetic algorithms and random keys for sequencing and optimization"

/// Decodes random keys into a permutation of `0..keys.len()`.
///
/// Indices are sorted by ascending key. The sort is stable, so equal keys
/// keep their index order; NaN keys sort last.
///
/// ```
/// use task_nsga::ordering::decode;
///
/// assert_eq!(decode(&[0.7, 0.1, 0.4]), vec![1, 2, 0]);
/// assert_eq!(decode(&[0.5, 0.5, 0.2]), vec![2, 0, 1]);
/// ```
pub fn decode(keys: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
    order
}

/// Encodes a permutation as evenly spaced keys in `(0, 1)`.
///
/// The task at position `p` of `order` receives key `(p + 0.5) / n`, so
/// `decode(&encode(order)) == order`.
///
/// # Panics
/// Panics if `order` is not a permutation of `0..order.len()`.
pub fn encode(order: &[usize]) -> Vec<f64> {
    let n = order.len();
    let mut keys = vec![f64::NAN; n];
    for (position, &task) in order.iter().enumerate() {
        assert!(
            task < n && keys[task].is_nan(),
            "order must be a permutation of 0..{n}"
        );
        keys[task] = (position as f64 + 0.5) / n as f64;
    }
    keys
}

/// Inverts an order: `positions[task] = index of task in order`.
pub fn positions(order: &[usize]) -> Vec<usize> {
    let mut pos = vec![0usize; order.len()];
    for (p, &task) in order.iter().enumerate() {
        pos[task] = p;
    }
    pos
}
