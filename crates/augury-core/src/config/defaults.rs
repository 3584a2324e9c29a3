// Single source of truth for all default values.

// --- Paths ---
pub const DEFAULT_CORPUS_PATH: &str = "data/corpus.jsonl";
pub const DEFAULT_SUBSTRATE_DIR: &str = "data/substrate";
pub const DEFAULT_PARITY_RECEIPT_PATH: &str = "receipts/parity.json";
pub const INDEX_FILENAME: &str = "index.bin";
pub const ID_MAP_FILENAME: &str = "index.ids.json";
pub const MANIFEST_FILENAME: &str = "index_manifest.json";

// --- Embeddings ---
pub const DEFAULT_EMBED_MODEL: &str = "BAAI/bge-large-en-v1.5";
pub const DEFAULT_EMBEDDING_DIM: usize = 1024;
pub const DEFAULT_METRIC: &str = "cosine";
pub const DEFAULT_API_KEY_ENV: &str = "AUGURY_EMBED_API_KEY";
pub const DEFAULT_EMBED_TIMEOUT_MS: u64 = 10_000;

// --- Retrieval ---
pub const DEFAULT_NORMALIZATION_EPS: f64 = 1e-12;
pub const DEFAULT_TIE_BREAK_EPS: f64 = 1e-10;
pub const DEFAULT_RERANK_TIE_BREAK_EPS: f64 = 1e-12;

// --- Parity ---
pub const DEFAULT_PARITY_K: usize = 10;
pub const DEFAULT_PARITY_SAMPLES: usize = 200;
pub const DEFAULT_PARITY_SEED: u64 = 0;
pub const DEFAULT_BENCH_QUERIES: usize = 1000;
pub const DEFAULT_BENCH_SEED: u64 = 1;
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.99;
pub const DEFAULT_P95_THRESHOLD_MS: f64 = 150.0;

// --- Service ---
pub const DEFAULT_CACHE_CAPACITY: u64 = 512;
pub const DEFAULT_QUERY_K: usize = 5;
pub const DEFAULT_MAX_QUERY_K: usize = 20;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
