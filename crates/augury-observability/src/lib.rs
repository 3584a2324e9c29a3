//! # augury-observability
//!
//! Tracing subscriber setup and the span vocabulary shared by the batch
//! tools and the query path.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_filter};
