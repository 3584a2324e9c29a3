//! Deterministic tie-break ordering.
//!
//! A row's ranking key is its score lowered by `eps * row / rows`. The
//! perturbation is monotone in row id, so exact ties resolve toward the lower
//! row, and two scorers whose accumulation order differs by less than `eps`
//! still agree on the ranking. Rows are then ordered by `(-key, row)`.

use std::cmp::Ordering;

/// Ranking key for `row` of a `rows`-row matrix.
#[inline]
pub fn perturbed(score: f64, row: usize, rows: usize, eps: f64) -> f64 {
    score - eps * (row as f64 / rows as f64)
}

/// Best-first order over `(key, row)`: higher key first, then lower row.
#[inline]
pub fn best_first(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1))
}

/// Keep the best `k` entries, sorted best-first.
///
/// `best_first` is a total order, so the result does not depend on the input
/// order.
pub fn top_k(mut ranked: Vec<(f64, usize)>, k: usize) -> Vec<(f64, usize)> {
    if k == 0 {
        return Vec::new();
    }
    if k < ranked.len() {
        ranked.select_nth_unstable_by(k - 1, best_first);
        ranked.truncate(k);
    }
    ranked.sort_unstable_by(best_first);
    ranked
}
