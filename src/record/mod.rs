//! Records - the timestamped entities held in a collection.
//!
//! Every record carries an opaque string `id`, a `created_at` timestamp and an
//! `updated_at` timestamp (milliseconds since the Unix epoch). `Record` is
//! normally derived:
//!
//! ```ignore
//! use pricebook::Record;
//!
//! #[derive(Clone, Serialize, Deserialize, Record)]
//! #[record(collection = "products")]
//! struct Product {
//!     id: String,
//!     name: String,
//!     created_at: i64,
//!     updated_at: i64,
//! }
//! ```

mod clock;
mod id;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ValidationError;

pub use clock::{Clock, ManualClock, SystemClock};
pub use id::IdGenerator;

/// A persisted entity with identity and timestamps.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Default storage key of the collection holding this record type.
    const COLLECTION: &'static str;

    /// Unique identifier, immutable after creation.
    fn id(&self) -> &str;

    fn created_at(&self) -> i64;

    fn updated_at(&self) -> i64;

    /// Refresh `updated_at`. Never moves it backwards, so
    /// `updated_at >= created_at` survives a clock that steps back.
    fn touch(&mut self, now: i64);
}

/// The content side of a record: what callers supply on create and update.
pub trait Content: Record {
    /// Content fields for a new record (everything except id and timestamps).
    type Draft: Send;

    /// Partial content for an update. Absent fields are left untouched.
    type Patch: Send;

    /// Build a new record. Both timestamps are set to `now`.
    fn from_draft(id: String, now: i64, draft: Self::Draft) -> Self;

    /// Check (and normalize) a patch before it is merged. The store calls
    /// this on every update, so an invalid patch is never persisted.
    fn validate_patch(patch: Self::Patch) -> Result<Self::Patch, ValidationError>;

    /// Merge a patch into this record. Timestamps are handled by the store.
    fn merge(&mut self, patch: Self::Patch);
}
