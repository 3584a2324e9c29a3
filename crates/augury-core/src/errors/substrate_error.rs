/// Errors raised while building, verifying, or loading a substrate.
#[derive(Debug, thiserror::Error)]
pub enum SubstrateError {
    #[error("missing {artifact}: {path}")]
    MissingInput { artifact: String, path: String },

    #[error("empty corpus: {path}")]
    EmptyCorpus { path: String },

    #[error("malformed corpus record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("ragged embeddings: line {line} has width {actual}, expected {expected}")]
    RaggedEmbedding {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate chunk id {chunk_id:?} at line {line}")]
    DuplicateChunkId { chunk_id: String, line: usize },

    #[error("Dim mismatch: data {actual} vs cfg {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Count mismatch (jsonl vs id_map vs index): {jsonl_lines} vs {id_map_len} vs {index_total}")]
    CountMismatch {
        jsonl_lines: usize,
        id_map_len: usize,
        index_total: usize,
    },

    #[error("sha256 mismatch: {artifact} (manifest {expected}, recomputed {actual})")]
    HashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },

    #[error("corrupt vector matrix: {reason}")]
    CorruptMatrix { reason: String },

    #[error("malformed id map: {reason}")]
    MalformedIdMap { reason: String },

    #[error("integrity check abstained: {}", violations.join("; "))]
    IntegrityAbstain { violations: Vec<String> },

    #[error("publish failed: {reason}")]
    PublishFailed { reason: String },
}
