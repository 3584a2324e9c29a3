//! # augury-embeddings
//!
//! Turns query text into vectors.
//!
//! The provider is chosen once from configuration, never by a runtime
//! failure. The `production` profile uses the API provider alone. The
//! `stand-in` profile uses the hashing stand-in, or the API provider with a
//! logged fallback to the stand-in.

pub mod degradation;
pub mod providers;
pub mod strategy;

pub use degradation::DegradationChain;
pub use providers::{ApiProvider, StandInProvider};
pub use strategy::EmbeddingStrategy;
