use serde::{Deserialize, Serialize};

use super::defaults;

/// Numeric constants for normalization and deterministic ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Added to L2 norms before division.
    pub normalization_eps: f64,
    /// Exact-engine perturbation: s' = s - eps * (i / N).
    pub tie_break_eps: f64,
    /// Perturbation used when re-ranking a candidate set in f64.
    pub rerank_tie_break_eps: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            normalization_eps: defaults::DEFAULT_NORMALIZATION_EPS,
            tie_break_eps: defaults::DEFAULT_TIE_BREAK_EPS,
            rerank_tie_break_eps: defaults::DEFAULT_RERANK_TIE_BREAK_EPS,
        }
    }
}
