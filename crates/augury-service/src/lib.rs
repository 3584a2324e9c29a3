//! # augury-service
//!
//! Answers free-text queries against a verified substrate.
//!
//! Handles are built once at process start ([`ServiceHandles::open`]) and
//! passed to callers; there are no lazily initialized globals.

pub mod cache;
pub mod handles;
pub mod normalize;
pub mod service;

pub use cache::{QueryCache, QueryKey};
pub use handles::ServiceHandles;
pub use normalize::normalize_query;
pub use service::QueryService;
