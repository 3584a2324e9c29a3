mod embedding_error;
mod parity_error;
mod retrieval_error;
mod substrate_error;

pub use embedding_error::EmbeddingError;
pub use parity_error::ParityError;
pub use retrieval_error::RetrievalError;
pub use substrate_error::SubstrateError;

/// Result alias used across the workspace.
pub type AuguryResult<T> = Result<T, AuguryError>;

/// Root error type. Subsystem errors convert into it with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AuguryError {
    #[error("substrate error: {0}")]
    SubstrateError(#[from] SubstrateError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("parity error: {0}")]
    ParityError(#[from] ParityError),

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {reason}")]
    SerializationError { reason: String },
}

impl AuguryError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Whether this error means "missing or invalid input": the batch tools
    /// report ABSTAIN (exit code 2) instead of a generic failure.
    pub fn is_abstain(&self) -> bool {
        matches!(
            self,
            Self::SubstrateError(
                SubstrateError::MissingInput { .. }
                    | SubstrateError::EmptyCorpus { .. }
                    | SubstrateError::MalformedRecord { .. }
                    | SubstrateError::RaggedEmbedding { .. }
                    | SubstrateError::DuplicateChunkId { .. }
                    | SubstrateError::IntegrityAbstain { .. }
            )
        )
    }
}

impl From<serde_json::Error> for AuguryError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: e.to_string(),
        }
    }
}
