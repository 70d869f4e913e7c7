//! Collection Store - CRUD with persistence over one key of a [`KeyValueStore`].
//!
//! A collection is the full ordered list of records of one type, mirrored as a
//! single JSON array under one storage key. Every mutation rewrites the whole
//! array and, once the write succeeds, publishes exactly the written list as
//! the new cached state.
//!
//! ## Example
//!
//! ```ignore
//! use pricebook::{CollectionStore, InMemoryKeyValueStore, NewProduct, Product};
//!
//! let store = CollectionStore::<Product, _>::new(InMemoryKeyValueStore::new());
//! store.load().await;
//! let rice = store.add(NewProduct::new("Rice", 60.0)?).await?;
//! assert_eq!(store.list().len(), 1);
//! ```
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

#[cfg(feature = "emitter")]
mod events;
mod queue;
mod store;

use serde::{Deserialize, Serialize};

#[cfg(feature = "emitter")]
pub use events::StoreEvent;
pub use store::CollectionStore;

/// What readers see: the cached records plus whether the first load is done.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<R> {
    pub records: Vec<R>,
    pub loading: bool,
}

impl<R> Snapshot<R> {
    pub(crate) fn pending() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
        }
    }
}

/// How overlapping mutations on one collection are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Every mutation reads the cache when it starts and writes when it can.
    /// Two mutations in flight at once both build on the same base and the
    /// last write to finish wins, dropping the other one's change.
    #[default]
    Overlapping,
    /// Mutations queue behind a per-collection writer lock, so each one reads
    /// its base only after the previous write has landed.
    Serialized,
}
