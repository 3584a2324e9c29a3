use serde::{Deserialize, Serialize};

use super::defaults;

/// Query service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Maximum number of cached (query, k) results.
    pub cache_capacity: u64,
    pub default_k: usize,
    /// Largest k a caller may request.
    pub max_k: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_capacity: defaults::DEFAULT_CACHE_CAPACITY,
            default_k: defaults::DEFAULT_QUERY_K,
            max_k: defaults::DEFAULT_MAX_QUERY_K,
        }
    }
}
