pub mod defaults;
mod embedding_config;
mod observability_config;
mod parity_config;
mod paths_config;
mod retrieval_config;
mod service_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::{EmbeddingConfig, EmbeddingProfile, ProviderKind};
pub use observability_config::ObservabilityConfig;
pub use parity_config::{ParityConfig, SearcherKind};
pub use paths_config::PathsConfig;
pub use retrieval_config::RetrievalConfig;
pub use service_config::ServiceConfig;

use crate::errors::{AuguryError, AuguryResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuguryConfig {
    pub paths: PathsConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub parity: ParityConfig,
    pub service: ServiceConfig,
    pub observability: ObservabilityConfig,
}

impl AuguryConfig {
    /// Parse a TOML string. Missing sections and fields take their defaults.
    pub fn from_toml(toml_str: &str) -> AuguryResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| AuguryError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> AuguryResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AuguryError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&text)
    }

    /// Reject values that would make the engine's output meaningless.
    pub fn validate(&self) -> AuguryResult<()> {
        let fail = |reason: &str| {
            Err(AuguryError::ConfigError {
                reason: reason.to_string(),
            })
        };
        if self.embedding.metric != crate::constants::METRIC_COSINE {
            return fail("embedding.metric must be \"cosine\"");
        }
        if self.parity.k == 0 {
            return fail("parity.k must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.parity.overlap_threshold) {
            return fail("parity.overlap_threshold must be within [0, 1]");
        }
        if self.parity.p95_threshold_ms <= 0.0 {
            return fail("parity.p95_threshold_ms must be positive");
        }
        if self.service.cache_capacity == 0 {
            return fail("service.cache_capacity must be at least 1");
        }
        if self.service.max_k == 0 || self.service.default_k == 0 {
            return fail("service.default_k and service.max_k must be at least 1");
        }
        if self.service.default_k > self.service.max_k {
            return fail("service.default_k must not exceed service.max_k");
        }
        if self.retrieval.tie_break_eps < 0.0 || self.retrieval.rerank_tie_break_eps < 0.0 {
            return fail("tie-break epsilons must be non-negative");
        }
        Ok(())
    }
}
