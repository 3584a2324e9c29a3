/// Augury system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Added to every L2 norm before dividing, so zero vectors normalize to zero
/// instead of NaN.
pub const NORMALIZATION_EPS: f64 = 1e-12;

/// Id-proportional perturbation applied by the exact engine: s' = s - eps * (i / N).
/// Small enough to keep genuine score gaps, large enough to order exact ties by row id.
pub const TIE_BREAK_EPS: f64 = 1e-10;

/// Id-proportional perturbation applied when re-ranking a candidate set in f64.
pub const RERANK_TIE_BREAK_EPS: f64 = 1e-12;

/// Minimum number of timed queries in a latency bench run.
pub const MIN_BENCH_QUERIES: usize = 1000;

/// Largest deviation from unit norm tolerated for a non-zero matrix row.
pub const NORM_TOLERANCE: f64 = 1e-3;

/// Index type recorded in the manifest.
pub const INDEX_TYPE: &str = "brutecosine";

/// Similarity metric recorded in the manifest.
pub const METRIC_COSINE: &str = "cosine";
