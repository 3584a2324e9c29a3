//! Flat inner-product scan over a private copy of the matrix.
//!
//! Shares no scoring code with the exact engine: a 4-lane dot product,
//! block-parallel bounded heaps, raw scores with lower-row tie-break.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use augury_core::errors::{AuguryResult, RetrievalError};
use augury_core::traits::INeighborSearcher;
use augury_index::VectorMatrix;
use rayon::prelude::*;

use super::ScoredEntry;

/// Rows scored per parallel task.
const BLOCK_ROWS: usize = 1024;

pub struct FlatSearcher {
    data: Vec<f32>,
    rows: usize,
    dim: usize,
}

impl FlatSearcher {
    pub fn new(matrix: &VectorMatrix) -> Self {
        Self {
            data: matrix.as_slice().to_vec(),
            rows: matrix.rows(),
            dim: matrix.dim(),
        }
    }

    /// Top `k` rows for `query` as `(row, score)`, best first, skipping `exclude`.
    pub fn search(&self, query: &[f32], k: usize, exclude: Option<usize>) -> Vec<(usize, f32)> {
        if k == 0 || self.rows == 0 || query.len() != self.dim {
            return Vec::new();
        }

        let partials: Vec<Vec<Reverse<ScoredEntry>>> = self
            .data
            .par_chunks(self.dim * BLOCK_ROWS)
            .enumerate()
            .map(|(block, chunk)| {
                let base = block * BLOCK_ROWS;
                let mut heap = BinaryHeap::with_capacity(k + 1);
                for (offset, row) in chunk.chunks_exact(self.dim).enumerate() {
                    let idx = base + offset;
                    if Some(idx) == exclude {
                        continue;
                    }
                    push_bounded(&mut heap, ScoredEntry { score: dot4(row, query), idx }, k);
                }
                heap.into_vec()
            })
            .collect();

        let mut heap = BinaryHeap::with_capacity(k + 1);
        for Reverse(entry) in partials.into_iter().flatten() {
            push_bounded(&mut heap, entry, k);
        }
        heap.into_sorted_vec()
            .into_iter()
            .map(|Reverse(e)| (e.idx, e.score))
            .collect()
    }
}

fn push_bounded(heap: &mut BinaryHeap<Reverse<ScoredEntry>>, entry: ScoredEntry, k: usize) {
    heap.push(Reverse(entry));
    if heap.len() > k {
        heap.pop();
    }
}

/// Dot product with four independent accumulators.
#[inline]
fn dot4(a: &[f32], b: &[f32]) -> f32 {
    let mut acc = [0.0f32; 4];
    let chunks_a = a.chunks_exact(4);
    let chunks_b = b.chunks_exact(4);
    let tail: f32 = chunks_a
        .remainder()
        .iter()
        .zip(chunks_b.remainder())
        .map(|(x, y)| x * y)
        .sum();
    for (x, y) in chunks_a.zip(chunks_b) {
        acc[0] += x[0] * y[0];
        acc[1] += x[1] * y[1];
        acc[2] += x[2] * y[2];
        acc[3] += x[3] * y[3];
    }
    (acc[0] + acc[1]) + (acc[2] + acc[3]) + tail
}

impl INeighborSearcher for FlatSearcher {
    fn name(&self) -> &str {
        "flat"
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn neighbors_of_row(&self, row: usize, k: usize) -> AuguryResult<Vec<usize>> {
        if row >= self.rows {
            return Err(RetrievalError::RowOutOfRange {
                row,
                rows: self.rows,
            }
            .into());
        }
        let query = &self.data[row * self.dim..(row + 1) * self.dim];
        Ok(self
            .search(query, k, Some(row))
            .into_iter()
            .map(|(idx, _)| idx)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot4_matches_naive_sum() {
        let a: Vec<f32> = (0..11).map(|i| i as f32 * 0.25).collect();
        let b: Vec<f32> = (0..11).map(|i| 1.0 - i as f32 * 0.1).collect();
        let naive: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        assert!((dot4(&a, &b) - naive).abs() < 1e-4);
    }

    #[test]
    fn excludes_self_and_orders_by_score() {
        let m = VectorMatrix::from_rows(
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.8, 0.6]],
            2,
        )
        .unwrap();
        let flat = FlatSearcher::new(&m);
        assert_eq!(flat.neighbors_of_row(0, 5).unwrap(), vec![2, 1]);
    }

    #[test]
    fn results_span_block_boundaries() {
        let rows: Vec<Vec<f32>> = (0..BLOCK_ROWS * 2 + 3)
            .map(|i| vec![(i as f32 * 0.001).cos(), (i as f32 * 0.001).sin()])
            .collect();
        let m = VectorMatrix::from_rows(rows, 2).unwrap();
        let flat = FlatSearcher::new(&m);
        let last = m.rows() - 1;
        let hits = flat.neighbors_of_row(last, 2).unwrap();
        assert_eq!(hits, vec![last - 1, last - 2]);
    }
}
