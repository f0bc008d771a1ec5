//! evalboard-core — Result store and query engine.
//!
//! This crate loads per-model, per-dataset math eval outputs from disk into an
//! immutable in-memory corpus and answers the read queries a results
//! dashboard needs: summaries, filtered case listings, pagination and
//! per-dataset comparisons.

pub mod config;
pub mod error;
pub mod model;
pub mod pagination;
pub mod params;
pub mod query;
pub mod store;

pub use error::LoadError;
pub use query::{DetailFilter, QueryEngine};
pub use store::ResultStore;
