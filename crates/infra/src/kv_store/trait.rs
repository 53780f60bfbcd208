use std::sync::Arc;

use thiserror::Error;

/// Failure of the backing key-value store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be read or written (IO, quota, closed pool, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A value could not be encoded for storage.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// String key/value storage with get/set semantics.
///
/// `set` replaces the whole value for a key in one step: a later `get`
/// never observes a partially written value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
