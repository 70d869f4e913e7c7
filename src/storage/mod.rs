//! Key-value persistence adapters.
//!
//! A collection is persisted as one string blob under one key. The adapter
//! only has to get and set whole values; it knows nothing about records.

mod file;
mod in_memory;

use std::future::Future;

use thiserror::Error;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

/// Async string-blob storage.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), StorageError>> + Send;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
