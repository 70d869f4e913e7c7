use std::sync::Arc;

use tokio::sync::watch;

use crate::collection::{CollectionStore, Snapshot, WriteMode};
use crate::error::StoreError;
use crate::record::Clock;
use crate::storage::KeyValueStore;

use super::{DueBill, DueBillPatch, NewDueBill};

/// The due-bill collection. Bills stay in the order they were added; editing
/// one does not move it.
#[derive(Debug)]
pub struct DueBillStore<S: KeyValueStore> {
    collection: CollectionStore<DueBill, S>,
}

impl<S: KeyValueStore> DueBillStore<S> {
    pub fn new(storage: S) -> Self {
        Self::from_collection(CollectionStore::new(storage))
    }

    pub fn from_collection(collection: CollectionStore<DueBill, S>) -> Self {
        Self { collection }
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self::from_collection(CollectionStore::with_key(storage, key))
    }

    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self::from_collection(self.collection.with_clock(clock))
    }

    pub fn with_write_mode(self, mode: WriteMode) -> Self {
        Self::from_collection(self.collection.with_write_mode(mode))
    }

    pub fn collection(&self) -> &CollectionStore<DueBill, S> {
        &self.collection
    }

    pub async fn load(&self) -> Vec<DueBill> {
        self.collection.load().await
    }

    pub fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    pub fn due_bills(&self) -> Vec<DueBill> {
        self.collection.list()
    }

    pub fn due_bill(&self, id: &str) -> Option<DueBill> {
        self.collection.get(id)
    }

    pub async fn add_due_bill(&self, bill: NewDueBill) -> Result<DueBill, StoreError> {
        self.collection.add(bill).await
    }

    pub async fn update_due_bill(
        &self,
        id: &str,
        patch: DueBillPatch,
    ) -> Result<Option<DueBill>, StoreError> {
        self.collection.update(id, patch).await
    }

    pub async fn delete_due_bill(&self, id: &str) -> Result<bool, StoreError> {
        self.collection.delete(id).await
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<DueBill>> {
        self.collection.subscribe()
    }
}
