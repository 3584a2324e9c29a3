//! # augury-core
//!
//! Foundation crate for the Augury retrieval engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AuguryConfig;
pub use errors::{AuguryError, AuguryResult};
pub use models::{CorpusRecord, IntegrityReceipt, Manifest, ParityReceipt, ScoredChunk};
