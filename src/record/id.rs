use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out record ids.
///
/// Ids are millisecond timestamps rendered as decimal strings, so they sort
/// and look like the ids already on disk. Two calls in the same millisecond
/// still get distinct ids: every id is at least one past the previous one.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Next id for a record created at `now`.
    ///
    /// Once the floor is `i64::MAX` there is no id above it, so the sequence
    /// restarts from `now`. Callers that need uniqueness against stored ids
    /// still have to check for collisions.
    pub fn next(&self, now: i64) -> String {
        let mut current = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = current.checked_add(1).map_or(now, |floor| now.max(floor));
            match self
                .last
                .compare_exchange(current, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate.to_string(),
                Err(actual) => current = actual,
            }
        }
    }

    /// Make sure future ids land after every numeric id in `ids`.
    pub fn observe<'a>(&self, ids: impl IntoIterator<Item = &'a str>) {
        if let Some(max) = ids.into_iter().filter_map(|id| id.parse::<i64>().ok()).max() {
            self.last.fetch_max(max, Ordering::SeqCst);
        }
    }
}
