//! Key-value storage boundary for the saved invoice collection.
//!
//! Backends only move opaque strings; encoding lives in the repository.

pub mod in_memory;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;
pub use r#trait::{KeyValueStore, StoreError};
