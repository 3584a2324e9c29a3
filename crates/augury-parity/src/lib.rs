//! # augury-parity
//!
//! Decides whether a candidate searcher may replace the exact engine.
//!
//! ```text
//! sample pool (seeded) ──► truth@K / candidate@K ──► overlap@K ─┐
//!          └────────────► latency bench (seeded) ──► p95 ms ────┴─► gate ──► receipt
//! ```

pub mod bench;
pub mod gate;
pub mod harness;
pub mod overlap;
pub mod receipt;
pub mod sampling;

pub use gate::{evaluate_candidate, overall_status};
pub use harness::VerificationRun;
pub use overlap::{overlap_at_k, pair_name};
pub use receipt::{read_receipt, write_receipt};
