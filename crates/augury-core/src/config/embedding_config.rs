use serde::{Deserialize, Serialize};

use super::defaults;

/// Operating profile for query embedding.
///
/// `Production` never substitutes a stand-in embedder. `StandIn` is for
/// tests, CI, and air-gapped demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingProfile {
    Production,
    StandIn,
}

/// Which embedding provider to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// HTTP embedding service speaking the `/embeddings` JSON protocol.
    Api,
    /// Deterministic hashed-term embedder. Not semantically meaningful.
    StandIn,
}

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding model identifier, recorded in the manifest.
    pub model: String,
    /// Expected embedding dimensionality.
    pub dim: usize,
    /// Similarity metric. Only "cosine" is supported.
    pub metric: String,
    pub profile: EmbeddingProfile,
    pub provider: ProviderKind,
    /// Endpoint URL for the API provider.
    pub endpoint: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Per-request timeout for the API provider.
    pub request_timeout_ms: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_EMBED_MODEL.to_string(),
            dim: defaults::DEFAULT_EMBEDDING_DIM,
            metric: defaults::DEFAULT_METRIC.to_string(),
            profile: EmbeddingProfile::Production,
            provider: ProviderKind::Api,
            endpoint: None,
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            request_timeout_ms: defaults::DEFAULT_EMBED_TIMEOUT_MS,
        }
    }
}
