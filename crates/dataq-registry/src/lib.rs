//! Saved-query persistence for the DataQ explorer.
//!
//! This crate provides the per-page registry of named queries and the
//! asynchronous key-value store contract it persists through, with
//! in-memory and JSON-file backends.

#![deny(missing_docs)]

mod models;
mod registry;
mod store;

pub use models::{ActionVisibility, SavedQueries, SavedQueryLink, SavedQueryRecord};
pub use registry::SavedQueryRegistry;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

#[cfg(test)]
pub use store::MockKeyValueStore;

/// Convenient result alias that reuses the core error type.
pub type Result<T> = dataq_core::Result<T>;
