//! Span definitions per operation: index build, integrity check, parity run, query.

/// Create an index build span.
#[macro_export]
macro_rules! index_build_span {
    ($corpus:expr) => {
        tracing::info_span!("augury.index_build", corpus = %$corpus)
    };
}

/// Create an integrity verification span.
#[macro_export]
macro_rules! integrity_span {
    ($substrate:expr) => {
        tracing::info_span!("augury.integrity", substrate = %$substrate)
    };
}

/// Create a parity run span.
#[macro_export]
macro_rules! parity_span {
    ($k:expr, $samples:expr) => {
        tracing::info_span!("augury.parity", k = $k, samples = $samples)
    };
}

/// Create a query span.
#[macro_export]
macro_rules! query_span {
    ($query:expr, $k:expr) => {
        tracing::debug_span!("augury.query", query = %$query, k = $k)
    };
}
