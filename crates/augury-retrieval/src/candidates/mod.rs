//! Candidate searchers validated against the exact engine.

mod flat;
mod rerank;

use std::cmp::Ordering;
use std::sync::Arc;

use augury_core::config::{RetrievalConfig, SearcherKind};
use augury_core::traits::INeighborSearcher;
use augury_index::VectorMatrix;

use crate::engine::ExactEngine;

pub use flat::FlatSearcher;
pub use rerank::RerankSearcher;

/// Construct the searcher for `kind` over `matrix`.
///
/// Construction copies or converts the matrix as the strategy needs; do it
/// before any timing starts.
pub fn build_searcher(
    kind: SearcherKind,
    matrix: &Arc<VectorMatrix>,
    config: &RetrievalConfig,
) -> Box<dyn INeighborSearcher> {
    match kind {
        SearcherKind::Exact => Box::new(ExactEngine::from_config(Arc::clone(matrix), config)),
        SearcherKind::Flat => Box::new(FlatSearcher::new(matrix)),
        SearcherKind::Rerank => Box::new(RerankSearcher::new(
            Arc::clone(matrix),
            config.rerank_tie_break_eps,
        )),
    }
}

/// Heap entry. Greater means better: higher score, then lower row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScoredEntry {
    pub score: f32,
    pub idx: usize,
}

impl PartialEq for ScoredEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredEntry {}

impl PartialOrd for ScoredEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}
