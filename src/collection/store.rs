//! CollectionStore - cached, persisted list of one record type.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::StoreError;
use crate::record::{Clock, Content, IdGenerator, SystemClock};
use crate::storage::KeyValueStore;

#[cfg(feature = "emitter")]
use super::events::{CollectionEvents, StoreEvent};
use super::queue::WriteQueue;
use super::{Snapshot, WriteMode};

/// Cached CRUD over the collection stored under one key.
///
/// - `load` reads and decodes the blob; an absent key or a corrupt blob
///   becomes an empty collection (logged, never returned as an error).
/// - `add` / `update` / `delete` take the cached list as their base, write
///   the complete new list, and publish it to the cache only once the write
///   succeeded.
/// - `list` / `is_loading` / `subscribe` read the cache and never touch
///   storage.
pub struct CollectionStore<R: Content, S: KeyValueStore> {
    storage: S,
    key: String,
    cache: watch::Sender<Snapshot<R>>,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
    queue: WriteQueue,
    #[cfg(feature = "emitter")]
    events: CollectionEvents,
}

impl<R: Content, S: KeyValueStore> CollectionStore<R, S> {
    /// Store under the record type's default key, on the wall clock, with
    /// overlapping writes.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, R::COLLECTION)
    }

    /// Store under an explicit storage key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            storage,
            cache: watch::Sender::new(Snapshot::pending()),
            ids: IdGenerator::new(),
            clock: Arc::new(SystemClock),
            queue: WriteQueue::new(WriteMode::default()),
            #[cfg(feature = "emitter")]
            events: CollectionEvents::new(&key),
            key,
        }
    }

    /// Replace the clock used for ids and timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.queue = WriteQueue::new(mode);
        self
    }

    /// The storage key this collection lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn write_mode(&self) -> WriteMode {
        self.queue.mode()
    }

    /// Access the underlying adapter.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Fetch the collection from storage and make it the cached state.
    ///
    /// Never fails: a missing key, a read error, or a blob that does not
    /// decode all yield an empty collection.
    pub async fn load(&self) -> Vec<R> {
        let records = match self.storage.get(&self.key).await {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<R>>(&blob) {
                Ok(records) => records,
                Err(err) => {
                    tracing::error!(
                        collection = %self.key,
                        error = %err,
                        "stored collection does not decode, starting empty"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::error!(
                    collection = %self.key,
                    error = %err,
                    "failed to read collection, starting empty"
                );
                Vec::new()
            }
        };

        self.ids.observe(records.iter().map(|r| r.id()));
        tracing::debug!(collection = %self.key, count = records.len(), "collection loaded");

        self.cache.send_replace(Snapshot {
            records: records.clone(),
            loading: false,
        });
        #[cfg(feature = "emitter")]
        self.events.emit(StoreEvent::Loaded, records.len().to_string());

        records
    }

    /// The cached records, in insertion order. Empty while the first load is
    /// pending.
    pub fn list(&self) -> Vec<R> {
        self.cache.borrow().records.clone()
    }

    /// True until the first `load` has completed.
    pub fn is_loading(&self) -> bool {
        self.cache.borrow().loading
    }

    /// Look up one cached record by id.
    pub fn get(&self, id: &str) -> Option<R> {
        self.cache.borrow().records.iter().find(|r| r.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().records.is_empty()
    }

    /// Observe every state the cache moves through.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<R>> {
        self.cache.subscribe()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new record built from `draft`. Returns the stored record.
    pub async fn add(&self, draft: R::Draft) -> Result<R, StoreError> {
        let _turn = self.queue.enter().await;

        let mut records = self.list();
        let now = self.clock.now_millis();
        let id = self.fresh_id(&records, now);
        let record = R::from_draft(id, now, draft);
        records.push(record.clone());

        self.persist(records).await?;
        tracing::debug!(collection = %self.key, id = %record.id(), "record added");
        #[cfg(feature = "emitter")]
        self.events.emit(StoreEvent::Added, record.id().to_string());

        Ok(record)
    }

    /// Merge `patch` into the record with `id` and refresh its `updated_at`.
    ///
    /// The patch is validated first; an invalid one fails with
    /// `StoreError::Invalid` and nothing is written. Returns `Ok(None)`
    /// without writing anything when no record has that id.
    pub async fn update(&self, id: &str, patch: R::Patch) -> Result<Option<R>, StoreError> {
        let patch = R::validate_patch(patch)?;
        let _turn = self.queue.enter().await;

        let mut records = self.list();
        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            tracing::debug!(collection = %self.key, id, "update of unknown id ignored");
            return Ok(None);
        };
        record.merge(patch);
        record.touch(self.clock.now_millis());
        let updated = record.clone();

        self.persist(records).await?;
        tracing::debug!(collection = %self.key, id, "record updated");
        #[cfg(feature = "emitter")]
        self.events.emit(StoreEvent::Updated, id.to_string());

        Ok(Some(updated))
    }

    /// Remove the record with `id`. Returns false, without writing, when no
    /// record has that id.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _turn = self.queue.enter().await;

        let mut records = self.list();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            tracing::debug!(collection = %self.key, id, "delete of unknown id ignored");
            return Ok(false);
        }

        self.persist(records).await?;
        tracing::debug!(collection = %self.key, id, "record deleted");
        #[cfg(feature = "emitter")]
        self.events.emit(StoreEvent::Deleted, id.to_string());

        Ok(true)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Call `listener` with the record id (or count, for `Loaded`) whenever
    /// `event` happens. Returns a listener id for [`Self::remove_listener`].
    #[cfg(feature = "emitter")]
    pub fn on<F>(&self, event: StoreEvent, listener: F) -> Option<String>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.events.on(event, listener)
    }

    #[cfg(feature = "emitter")]
    pub fn remove_listener(&self, listener_id: &str) -> bool {
        self.events.remove(listener_id)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn fresh_id(&self, records: &[R], now: i64) -> String {
        loop {
            let id = self.ids.next(now);
            if !records.iter().any(|r| r.id() == id) {
                return id;
            }
        }
    }

    /// Write the full list, then publish exactly what was written.
    async fn persist(&self, records: Vec<R>) -> Result<(), StoreError> {
        let blob = serde_json::to_string(&records).map_err(|source| StoreError::Encode {
            collection: self.key.clone(),
            source,
        })?;

        if let Err(source) = self.storage.set(&self.key, blob).await {
            tracing::error!(collection = %self.key, error = %source, "failed to save collection");
            return Err(StoreError::Storage {
                collection: self.key.clone(),
                source,
            });
        }

        self.cache.send_modify(|snapshot| snapshot.records = records);
        Ok(())
    }
}

impl<R: Content, S: KeyValueStore> std::fmt::Debug for CollectionStore<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.cache.borrow();
        f.debug_struct("CollectionStore")
            .field("key", &self.key)
            .field("len", &snapshot.records.len())
            .field("loading", &snapshot.loading)
            .field("write_mode", &self.queue.mode())
            .finish_non_exhaustive()
    }
}
