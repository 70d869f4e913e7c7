use thiserror::Error;

use crate::storage::StorageError;

/// Input rejected before it reaches a store. The `Display` text is meant to be
/// shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a name")]
    EmptyName,
    #[error("Please enter a note")]
    EmptyNote,
    #[error("Please enter a valid price")]
    InvalidPrice,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The durable write (or an explicit read) failed. The in-memory cache was
    /// not advanced.
    #[error("storage error on collection {collection}: {source}")]
    Storage {
        collection: String,
        #[source]
        source: StorageError,
    },
    #[error("failed to encode collection {collection}: {source}")]
    Encode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl StoreError {
    /// True when the failure came from input validation rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Invalid(_))
    }
}
