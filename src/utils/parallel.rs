//! Parallel execution helpers on the rayon global pool.

use rayon::prelude::*;

/// Execute a map operation in parallel, preserving input order.
pub fn parallel_map<T, U, F>(items: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    items.par_iter().map(f).collect()
}

/// Execute a map operation, in parallel only when there are at least
/// `threshold` items. Output order always matches input order.
#[inline]
pub fn maybe_parallel_map_threshold<T, U, F>(items: &[T], threshold: usize, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    if items.len() >= threshold {
        items.par_iter().map(&f).collect()
    } else {
        items.iter().map(f).collect()
    }
}
