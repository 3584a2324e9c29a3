use serde::{Deserialize, Serialize};

/// One retrieval result returned to query callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk_id: String,
    pub score: f32,
    pub text: String,
}

/// Query-cache counters: cumulative totals plus what this call contributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits_total: u64,
    pub misses_total: u64,
    pub hit_delta: u64,
    pub miss_delta: u64,
    pub cache_size: u64,
}
