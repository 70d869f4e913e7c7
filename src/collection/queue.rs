//! Per-collection writer queue.
//!
//! In [`WriteMode::Serialized`] a mutation holds the queue from the moment it
//! reads the cached base until its write has been published. Waiters are
//! served in FIFO order by the tokio mutex.

use tokio::sync::{Mutex, MutexGuard};

use super::WriteMode;

#[derive(Debug)]
pub(crate) enum WriteQueue {
    Overlapping,
    Serialized(Mutex<()>),
}

impl WriteQueue {
    pub(crate) fn new(mode: WriteMode) -> Self {
        match mode {
            WriteMode::Overlapping => WriteQueue::Overlapping,
            WriteMode::Serialized => WriteQueue::Serialized(Mutex::new(())),
        }
    }

    pub(crate) fn mode(&self) -> WriteMode {
        match self {
            WriteQueue::Overlapping => WriteMode::Overlapping,
            WriteQueue::Serialized(_) => WriteMode::Serialized,
        }
    }

    /// Wait for our turn. The returned guard (if any) must live until the
    /// mutation has published its result.
    pub(crate) async fn enter(&self) -> Option<MutexGuard<'_, ()>> {
        match self {
            WriteQueue::Overlapping => None,
            WriteQueue::Serialized(lock) => Some(lock.lock().await),
        }
    }
}
