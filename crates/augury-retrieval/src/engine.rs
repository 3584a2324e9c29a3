//! Exact Retrieval Engine.

use std::sync::Arc;

use augury_core::config::RetrievalConfig;
use augury_core::errors::{AuguryResult, RetrievalError};
use augury_core::traits::INeighborSearcher;
use augury_index::VectorMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tiebreak::{perturbed, top_k};

/// How a query relates to the corpus.
#[derive(Debug, Clone, Copy)]
pub enum SearchMode<'q> {
    /// The query is corpus row `row`. That row is excluded from its own results.
    Verification { row: usize },
    /// An external, unit-normalized query vector. Nothing is excluded.
    Production { query: &'q [f32] },
}

/// One ranked result row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub row: usize,
    /// Raw cosine similarity, before tie-break perturbation.
    pub score: f32,
}

/// Brute-force cosine search with deterministic id-perturbed tie-break.
#[derive(Debug, Clone)]
pub struct ExactEngine {
    matrix: Arc<VectorMatrix>,
    tie_break_eps: f64,
}

impl ExactEngine {
    pub fn new(matrix: Arc<VectorMatrix>, tie_break_eps: f64) -> Self {
        Self {
            matrix,
            tie_break_eps,
        }
    }

    pub fn from_config(matrix: Arc<VectorMatrix>, config: &RetrievalConfig) -> Self {
        Self::new(matrix, config.tie_break_eps)
    }

    pub fn matrix(&self) -> &Arc<VectorMatrix> {
        &self.matrix
    }

    /// Top `k` rows for `mode`, best first.
    ///
    /// Fewer than `k` results come back only when fewer eligible rows exist.
    pub fn search(&self, mode: SearchMode<'_>, k: usize) -> AuguryResult<Vec<Neighbor>> {
        let rows = self.matrix.rows();
        let (query, excluded) = match mode {
            SearchMode::Verification { row } => {
                if row >= rows {
                    return Err(RetrievalError::RowOutOfRange { row, rows }.into());
                }
                (self.matrix.row(row), Some(row))
            }
            SearchMode::Production { query } => {
                if query.len() != self.matrix.dim() {
                    return Err(RetrievalError::QueryDimensionMismatch {
                        expected: self.matrix.dim(),
                        actual: query.len(),
                    }
                    .into());
                }
                (query, None)
            }
        };
        if k == 0 || rows == 0 {
            return Ok(Vec::new());
        }

        let scores = self.scores(query);
        let ranked: Vec<(f64, usize)> = scores
            .iter()
            .enumerate()
            .filter(|(row, _)| Some(*row) != excluded)
            .map(|(row, &s)| (perturbed(f64::from(s), row, rows, self.tie_break_eps), row))
            .collect();

        Ok(top_k(ranked, k)
            .into_iter()
            .map(|(_, row)| Neighbor {
                row,
                score: scores[row],
            })
            .collect())
    }

    /// s = V·q for every row, in row order.
    fn scores(&self, query: &[f32]) -> Vec<f32> {
        self.matrix
            .as_slice()
            .par_chunks_exact(self.matrix.dim())
            .map(|row| dot(row, query))
            .collect()
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl INeighborSearcher for ExactEngine {
    fn name(&self) -> &str {
        "exact"
    }

    fn rows(&self) -> usize {
        self.matrix.rows()
    }

    fn neighbors_of_row(&self, row: usize, k: usize) -> AuguryResult<Vec<usize>> {
        Ok(self
            .search(SearchMode::Verification { row }, k)?
            .into_iter()
            .map(|n| n.row)
            .collect())
    }
}
