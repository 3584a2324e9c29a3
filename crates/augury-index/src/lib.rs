//! # augury-index
//!
//! Turns a corpus of raw embeddings into a published, verifiable substrate.
//!
//! ## Architecture
//!
//! ```text
//! corpus.jsonl ──► IndexBuilder ──► staging dir ──► atomic swap ──► substrate/
//!                                                                   ├── index.bin
//!                                                                   ├── index.ids.json
//!                                                                   └── index_manifest.json
//! substrate/ + corpus ──► IntegrityVerifier ──► IntegrityReceipt (DONE | ABSTAIN)
//!                                          └──► Substrate (only on DONE)
//! ```

pub mod builder;
pub mod corpus;
pub mod hashing;
pub mod id_map;
pub mod matrix;
pub mod normalize;
pub mod publish;
pub mod substrate;
pub mod verifier;

pub use builder::{BuildReport, IndexBuilder};
pub use id_map::IdMap;
pub use matrix::VectorMatrix;
pub use substrate::Substrate;
pub use verifier::IntegrityVerifier;
