/// Parity evaluation, benchmarking, and receipt errors.
#[derive(Debug, thiserror::Error)]
pub enum ParityError {
    #[error("metric {metric} was never computed for candidate {candidate}")]
    IncompleteMetric { candidate: String, metric: String },

    #[error("receipt already exists: {path}")]
    ReceiptExists { path: String },

    #[error("searchers disagree on corpus size: {left} has {left_rows}, {right} has {right_rows}")]
    ShapeMismatch {
        left: String,
        left_rows: usize,
        right: String,
        right_rows: usize,
    },
}
