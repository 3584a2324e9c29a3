/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("row {row} out of range for matrix with {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("query dimension mismatch: matrix has {expected}, query has {actual}")]
    QueryDimensionMismatch { expected: usize, actual: usize },

    #[error("k must be within 1..={max}, got {k}")]
    InvalidK { k: usize, max: usize },

    #[error("query is empty after normalization")]
    EmptyQuery,

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },
}
