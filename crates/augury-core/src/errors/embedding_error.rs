/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("provider misconfigured: {reason}")]
    Misconfigured { reason: String },

    #[error("stand-in embedder is not permitted in the {profile} profile")]
    StandInForbidden { profile: String },
}
