//! Bounded LRU cache of query results, using moka.
//!
//! Keyed by (normalized text, k). Concurrent misses on the same key are
//! coalesced into one computation. Entries live until evicted or the
//! process exits.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use augury_core::errors::{AuguryError, AuguryResult, RetrievalError};
use augury_core::models::{CacheStats, ScoredChunk};
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use tracing::debug;

/// Normalized query text and k.
pub type QueryKey = (String, usize);

/// Outcome of one cache lookup.
pub struct Lookup {
    pub results: Arc<Vec<ScoredChunk>>,
    pub hit: bool,
}

pub struct QueryCache {
    cache: Cache<QueryKey, Arc<Vec<ScoredChunk>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QueryCache {
    pub fn new(capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached results for `key`, or compute and insert them.
    ///
    /// Failed computations are not cached.
    pub fn get_or_compute<F>(&self, key: QueryKey, compute: F) -> AuguryResult<Lookup>
    where
        F: FnOnce() -> AuguryResult<Vec<ScoredChunk>>,
    {
        let entry = self
            .cache
            .entry(key)
            .or_try_insert_with(|| compute().map(Arc::new))
            .map_err(unshare)?;

        let hit = !entry.is_fresh();
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(query = %entry.key().0, k = entry.key().1, "query cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(query = %entry.key().0, k = entry.key().1, "query cache miss");
        }

        Ok(Lookup {
            results: entry.into_value(),
            hit,
        })
    }

    /// Current entry count, after flushing pending maintenance.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Cumulative totals with the given per-call deltas.
    pub fn stats(&self, hit_delta: u64, miss_delta: u64) -> CacheStats {
        CacheStats {
            hits_total: self.hits.load(Ordering::Relaxed),
            misses_total: self.misses.load(Ordering::Relaxed),
            hit_delta,
            miss_delta,
            cache_size: self.len(),
        }
    }
}

/// moka hands back init errors behind an `Arc`.
fn unshare(err: Arc<AuguryError>) -> AuguryError {
    Arc::try_unwrap(err).unwrap_or_else(|shared| {
        RetrievalError::SearchFailed {
            reason: shared.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str) -> ScoredChunk {
        ScoredChunk {
            chunk_id: id.to_string(),
            score: 1.0,
            text: String::new(),
        }
    }

    fn key(q: &str, k: usize) -> QueryKey {
        (q.to_string(), k)
    }

    #[test]
    fn second_lookup_hits() {
        let cache = QueryCache::new(8);
        let first = cache
            .get_or_compute(key("a", 1), || Ok(vec![chunk("x")]))
            .unwrap();
        assert!(!first.hit);
        let second = cache
            .get_or_compute(key("a", 1), || panic!("must not recompute"))
            .unwrap();
        assert!(second.hit);
        assert_eq!(second.results[0].chunk_id, "x");

        let stats = cache.stats(1, 0);
        assert_eq!((stats.hits_total, stats.misses_total), (1, 1));
        assert_eq!(stats.cache_size, 1);
    }

    #[test]
    fn k_is_part_of_the_key() {
        let cache = QueryCache::new(8);
        cache.get_or_compute(key("a", 1), || Ok(vec![])).unwrap();
        let other = cache.get_or_compute(key("a", 2), || Ok(vec![])).unwrap();
        assert!(!other.hit);
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = QueryCache::new(8);
        let err = cache.get_or_compute(key("bad", 1), || {
            Err(RetrievalError::EmptyQuery.into())
        });
        assert!(err.is_err());
        assert!(!cache.contains(&key("bad", 1)));
        assert_eq!(cache.stats(0, 0).misses_total, 0);
    }

    #[test]
    fn capacity_is_bounded() {
        let cache = QueryCache::new(2);
        for i in 0..10 {
            cache
                .get_or_compute(key(&format!("q{i}"), 1), || Ok(vec![]))
                .unwrap();
        }
        assert!(cache.len() <= 2);
    }
}
