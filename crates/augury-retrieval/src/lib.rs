//! # augury-retrieval
//!
//! Brute-force cosine retrieval over a verified vector matrix.
//!
//! [`ExactEngine`] is the reference ("truth") ranking. It runs in one of two
//! named modes: [`SearchMode::Verification`] for queries that are corpus rows
//! (the row excludes itself) and [`SearchMode::Production`] for external
//! query vectors. The [`candidates`] module holds alternative searchers that
//! must agree with the engine before they are trusted.

pub mod candidates;
pub mod engine;
pub mod tiebreak;

pub use candidates::{build_searcher, FlatSearcher, RerankSearcher};
pub use engine::{ExactEngine, Neighbor, SearchMode};
