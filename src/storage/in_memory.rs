//! InMemoryKeyValueStore - HashMap-backed adapter for tests and development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::{KeyValueStore, StorageError};

/// In-memory key-value store. Clone-friendly via Arc: clones share data.
///
/// Failure and latency can be injected to exercise the error and
/// overlapping-write paths of the stores built on top of it.
#[derive(Clone, Debug, Default)]
pub struct InMemoryKeyValueStore {
    storage: Arc<RwLock<HashMap<String, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    write_latency: Option<Duration>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every write by `latency` before it lands.
    pub fn with_write_latency(mut self, latency: Duration) -> Self {
        self.write_latency = Some(latency);
        self
    }

    /// Make subsequent reads fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Store a raw value directly, bypassing failure injection and latency.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("put_raw"))?;
        storage.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Read a raw value directly, bypassing failure injection.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("get_raw"))?;
        Ok(storage.get(key).cloned())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("read of {} refused", key)));
        }
        self.get_raw(key)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if let Some(latency) = self.write_latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("write of {} refused", key)));
        }
        self.put_raw(key, value)
    }
}
