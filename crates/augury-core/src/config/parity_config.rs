use std::fmt;

use serde::{Deserialize, Serialize};

use super::defaults;

/// A neighbor-search strategy that can take part in a parity run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearcherKind {
    /// Brute-force engine with id-perturbed tie-break.
    Exact,
    /// Independent flat inner-product scan.
    Flat,
    /// Half-precision candidate stage, re-ranked in f64.
    Rerank,
}

impl SearcherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Flat => "flat",
            Self::Rerank => "rerank",
        }
    }
}

impl fmt::Display for SearcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parity evaluation, latency bench, and gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParityConfig {
    /// Neighbors per query (the K in overlap@K).
    pub k: usize,
    /// Rows sampled without replacement for the parity pool.
    pub samples: usize,
    /// Seed for the sample pool.
    pub seed: u64,
    /// Timed queries per candidate. Raised to the bench minimum if lower.
    pub bench_queries: usize,
    /// Seed for drawing bench queries from the pool.
    pub bench_seed: u64,
    pub overlap_threshold: f64,
    pub p95_threshold_ms: f64,
    /// Strategies treated as truth. `exact` is always included.
    pub truths: Vec<SearcherKind>,
    /// Strategies gated against the exact truth.
    pub candidates: Vec<SearcherKind>,
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            k: defaults::DEFAULT_PARITY_K,
            samples: defaults::DEFAULT_PARITY_SAMPLES,
            seed: defaults::DEFAULT_PARITY_SEED,
            bench_queries: defaults::DEFAULT_BENCH_QUERIES,
            bench_seed: defaults::DEFAULT_BENCH_SEED,
            overlap_threshold: defaults::DEFAULT_OVERLAP_THRESHOLD,
            p95_threshold_ms: defaults::DEFAULT_P95_THRESHOLD_MS,
            truths: vec![SearcherKind::Exact, SearcherKind::Flat],
            candidates: vec![SearcherKind::Flat, SearcherKind::Rerank],
        }
    }
}
