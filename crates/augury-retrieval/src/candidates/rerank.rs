//! Half-precision candidate stage followed by a full-precision rerank.
//!
//! Stage one scans an f16 copy of the matrix and keeps exactly K ids. Stage
//! two rescores only those ids in f64 against the f32 rows and re-sorts them
//! with the id-perturbed tie-break. Ordering errors from the cheap stage are
//! repaired locally; membership errors are not, which is what parity measures.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use augury_core::errors::{AuguryResult, RetrievalError};
use augury_core::traits::INeighborSearcher;
use augury_index::VectorMatrix;
use half::f16;
use rayon::prelude::*;

use super::ScoredEntry;
use crate::tiebreak::perturbed;

pub struct RerankSearcher {
    coarse: Vec<f16>,
    full: Arc<VectorMatrix>,
    eps: f64,
}

impl RerankSearcher {
    pub fn new(full: Arc<VectorMatrix>, eps: f64) -> Self {
        let coarse = full
            .as_slice()
            .par_iter()
            .map(|&x| f16::from_f32(x))
            .collect();
        Self { coarse, full, eps }
    }

    /// Stage one: the `k` best rows by f16 score, `row` excluded.
    pub fn candidates(&self, row: usize, k: usize) -> Vec<usize> {
        let dim = self.full.dim();
        if k == 0 || dim == 0 || row >= self.full.rows() {
            return Vec::new();
        }
        let query = self.full.row(row);
        let mut heap = BinaryHeap::with_capacity(k + 1);
        for (idx, coarse_row) in self.coarse.chunks_exact(dim).enumerate() {
            if idx == row {
                continue;
            }
            heap.push(Reverse(ScoredEntry {
                score: dot_f16_f32(coarse_row, query),
                idx,
            }));
            if heap.len() > k {
                heap.pop();
            }
        }
        heap.into_sorted_vec()
            .into_iter()
            .map(|Reverse(e)| e.idx)
            .collect()
    }

    /// Stage two: rescore `candidate_ids` against `query_row` in f64 and
    /// return the best `k`.
    ///
    /// The sort is stable, so ids with identical perturbed scores keep their
    /// stage-one order. Returns `min(k, candidate_ids.len())` ids.
    pub fn rerank(
        &self,
        query_row: usize,
        candidate_ids: &[usize],
        k: usize,
    ) -> AuguryResult<Vec<usize>> {
        let rows = self.full.rows();
        if let Some(&row) = std::iter::once(&query_row)
            .chain(candidate_ids)
            .find(|&&r| r >= rows)
        {
            return Err(RetrievalError::RowOutOfRange { row, rows }.into());
        }
        let query = self.full.row(query_row);
        let mut scored: Vec<(f64, usize)> = candidate_ids
            .iter()
            .map(|&id| {
                let s = dot_f64(self.full.row(id), query);
                (perturbed(s, id, rows, self.eps), id)
            })
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(scored.into_iter().take(k).map(|(_, id)| id).collect())
    }
}

#[inline]
fn dot_f16_f32(a: &[f16], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x.to_f32() * y).sum()
}

#[inline]
fn dot_f64(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}

impl INeighborSearcher for RerankSearcher {
    fn name(&self) -> &str {
        "rerank"
    }

    fn rows(&self) -> usize {
        self.full.rows()
    }

    fn neighbors_of_row(&self, row: usize, k: usize) -> AuguryResult<Vec<usize>> {
        let rows = self.full.rows();
        if row >= rows {
            return Err(RetrievalError::RowOutOfRange { row, rows }.into());
        }
        let ids = self.candidates(row, k);
        self.rerank(row, &ids, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn searcher() -> RerankSearcher {
        let rows = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.6, 0.8, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.8, 0.6, 0.0],
        ];
        RerankSearcher::new(Arc::new(VectorMatrix::from_rows(rows, 3).unwrap()), 1e-12)
    }

    #[test]
    fn stage_one_keeps_exactly_k() {
        let s = searcher();
        let ids = s.candidates(0, 2);
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&0));
    }

    #[test]
    fn rerank_orders_by_full_precision_score() {
        let s = searcher();
        assert_eq!(s.rerank(0, &[3, 1, 4], 3).unwrap(), vec![4, 1, 3]);
    }

    #[test]
    fn rerank_of_short_candidate_list_is_short() {
        let s = searcher();
        assert_eq!(s.rerank(0, &[2], 4).unwrap().len(), 1);
        assert!(s.rerank(0, &[], 4).unwrap().is_empty());
    }

    #[test]
    fn rerank_rejects_unknown_rows() {
        let s = searcher();
        assert!(s.rerank(0, &[1, 99], 2).is_err());
        assert!(s.rerank(42, &[1], 1).is_err());
    }

    #[test]
    fn neighbors_match_exact_on_well_separated_rows() {
        let s = searcher();
        assert_eq!(s.neighbors_of_row(0, 2).unwrap(), vec![4, 1]);
    }
}
