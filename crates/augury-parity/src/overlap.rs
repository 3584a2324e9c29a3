//! overlap@K between two searchers over a sample pool.

use std::collections::HashSet;

use augury_core::errors::{AuguryResult, ParityError};
use augury_core::traits::INeighborSearcher;
use rayon::prelude::*;

/// Metric key for a truth/candidate pair, e.g. `exact_truth_vs_rerank`.
pub fn pair_name(truth: &str, candidate: &str) -> String {
    format!("{truth}_truth_vs_{candidate}")
}

/// Neighbor lists for every pooled row, in pool order.
pub fn neighbor_lists(
    searcher: &dyn INeighborSearcher,
    pool: &[usize],
    k: usize,
) -> AuguryResult<Vec<Vec<usize>>> {
    pool.par_iter()
        .map(|&row| searcher.neighbors_of_row(row, k))
        .collect()
}

/// Fail if two searchers do not cover the same rows.
pub fn ensure_same_shape(
    truth: &dyn INeighborSearcher,
    candidate: &dyn INeighborSearcher,
) -> AuguryResult<()> {
    if truth.rows() != candidate.rows() {
        return Err(ParityError::ShapeMismatch {
            left: truth.name().to_string(),
            left_rows: truth.rows(),
            right: candidate.name().to_string(),
            right_rows: candidate.rows(),
        }
        .into());
    }
    Ok(())
}

/// Agreement of one query's top-K lists, in [0, 1].
///
/// The denominator is the number of truth ids (at most K), so a corpus with
/// fewer than K eligible neighbors can still reach 1.0. Two empty lists agree.
pub fn query_overlap(truth: &[usize], candidate: &[usize], k: usize) -> f64 {
    let t: HashSet<usize> = truth.iter().take(k).copied().collect();
    let c: HashSet<usize> = candidate.iter().take(k).copied().collect();
    if t.is_empty() {
        return if c.is_empty() { 1.0 } else { 0.0 };
    }
    t.intersection(&c).count() as f64 / t.len() as f64
}

/// Mean per-query overlap. `None` when there is nothing to average.
///
/// Summed sequentially in pool order so the value is bit-identical across
/// runs.
pub fn overlap_at_k(truth: &[Vec<usize>], candidate: &[Vec<usize>], k: usize) -> Option<f64> {
    if truth.is_empty() || truth.len() != candidate.len() {
        return None;
    }
    let total: f64 = truth
        .iter()
        .zip(candidate)
        .map(|(t, c)| query_overlap(t, c, k))
        .sum();
    Some(total / truth.len() as f64)
}
