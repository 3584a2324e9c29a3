//! The `ask` operation.

use std::sync::Arc;

use augury_core::config::ServiceConfig;
use augury_core::errors::{AuguryResult, RetrievalError};
use augury_core::models::{CacheStats, ScoredChunk};
use augury_embeddings::EmbeddingStrategy;
use augury_index::normalize::l2_normalize;
use augury_index::Substrate;
use augury_retrieval::{ExactEngine, SearchMode};

use crate::cache::QueryCache;
use crate::normalize::normalize_query;

/// Production query path over one substrate generation.
///
/// Queries are never corpus members, so the engine runs without
/// self-exclusion.
pub struct QueryService {
    substrate: Substrate,
    engine: ExactEngine,
    embedder: Arc<EmbeddingStrategy>,
    cache: QueryCache,
    max_k: usize,
    normalization_eps: f64,
}

impl QueryService {
    pub fn new(
        substrate: Substrate,
        engine: ExactEngine,
        embedder: Arc<EmbeddingStrategy>,
        config: &ServiceConfig,
        normalization_eps: f64,
    ) -> Self {
        Self {
            substrate,
            engine,
            embedder,
            cache: QueryCache::new(config.cache_capacity),
            max_k: config.max_k,
            normalization_eps,
        }
    }

    pub fn ask(&self, query: &str, k: usize) -> AuguryResult<Vec<ScoredChunk>> {
        self.ask_with_stats(query, k).map(|(results, _)| results)
    }

    /// `ask` plus cache counters for this call.
    pub fn ask_with_stats(
        &self,
        query: &str,
        k: usize,
    ) -> AuguryResult<(Vec<ScoredChunk>, CacheStats)> {
        if k == 0 || k > self.max_k {
            return Err(RetrievalError::InvalidK { k, max: self.max_k }.into());
        }
        let normalized = normalize_query(query);
        if normalized.is_empty() {
            return Err(RetrievalError::EmptyQuery.into());
        }

        let span = augury_observability::query_span!(normalized, k);
        let _guard = span.enter();

        let lookup = self
            .cache
            .get_or_compute((normalized.clone(), k), || self.retrieve(&normalized, k))?;
        let stats = if lookup.hit {
            self.cache.stats(1, 0)
        } else {
            self.cache.stats(0, 1)
        };
        Ok((lookup.results.as_ref().clone(), stats))
    }

    fn retrieve(&self, normalized: &str, k: usize) -> AuguryResult<Vec<ScoredChunk>> {
        let raw = self.embedder.embed(normalized)?;
        if raw.len() != self.substrate.dim() {
            return Err(RetrievalError::QueryDimensionMismatch {
                expected: self.substrate.dim(),
                actual: raw.len(),
            }
            .into());
        }
        let query = l2_normalize(&raw, self.normalization_eps);

        let neighbors = self.engine.search(SearchMode::Production { query: &query }, k)?;
        neighbors
            .into_iter()
            .map(|n| -> AuguryResult<ScoredChunk> {
                let out_of_range = || RetrievalError::RowOutOfRange {
                    row: n.row,
                    rows: self.substrate.rows(),
                };
                Ok(ScoredChunk {
                    chunk_id: self.substrate.chunk_id(n.row).ok_or_else(out_of_range)?.to_string(),
                    score: n.score,
                    text: self.substrate.text(n.row).ok_or_else(out_of_range)?.to_string(),
                })
            })
            .collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats(0, 0)
    }

    pub fn substrate(&self) -> &Substrate {
        &self.substrate
    }
}
