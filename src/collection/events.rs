//! Change notifications for a collection, backed by `event-emitter-rs`.
//!
//! Event names are `"<collection>:<kind>"`, e.g. `"products:added"`. The
//! payload is the affected record id, or the record count for `loaded`.
//! Listeners run on emitter threads after the durable write, so they must not
//! assume they run before the mutating call returns.

use std::fmt;
use std::sync::Mutex;

use event_emitter_rs::EventEmitter;

/// Kinds of change a collection announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    Loaded,
    Added,
    Updated,
    Deleted,
}

impl StoreEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreEvent::Loaded => "loaded",
            StoreEvent::Added => "added",
            StoreEvent::Updated => "updated",
            StoreEvent::Deleted => "deleted",
        }
    }

    /// Full event name for a collection key.
    pub fn name(&self, collection: &str) -> String {
        format!("{}:{}", collection, self.as_str())
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) struct CollectionEvents {
    collection: String,
    emitter: Mutex<EventEmitter>,
}

impl CollectionEvents {
    pub(crate) fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Register a listener. Returns the emitter's listener id.
    pub(crate) fn on<F>(&self, event: StoreEvent, listener: F) -> Option<String>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self.emitter.lock().ok()?;
        Some(emitter.on(&event.name(&self.collection), listener))
    }

    pub(crate) fn remove(&self, listener_id: &str) -> bool {
        match self.emitter.lock() {
            Ok(mut emitter) => emitter.remove_listener(listener_id).is_some(),
            Err(_) => false,
        }
    }

    pub(crate) fn emit(&self, event: StoreEvent, payload: String) {
        match self.emitter.lock() {
            Ok(mut emitter) => {
                emitter.emit(&event.name(&self.collection), payload);
            }
            Err(_) => tracing::warn!(
                collection = %self.collection,
                event = %event,
                "event emitter lock poisoned, dropping notification"
            ),
        }
    }
}

impl fmt::Debug for CollectionEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionEvents")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_scoped_by_collection() {
        assert_eq!(StoreEvent::Added.name("products"), "products:added");
        assert_eq!(StoreEvent::Loaded.name("dueBills"), "dueBills:loaded");
        assert_eq!(StoreEvent::Deleted.to_string(), "deleted");
    }
}
