use std::collections::HashMap;

use parking_lot::Mutex;
use sonarelay_model::{Episode, PendingSeason, SeasonKey};

/// Accumulation queue for in-flight bursts, keyed by (series, season).
///
/// All access goes through a single mutex; every critical section is one map
/// operation, and the lock is never held across an await point. A key
/// present in the map always carries at least one episode.
#[derive(Debug, Default)]
pub struct AggregationStore {
    inner: Mutex<HashMap<SeasonKey, PendingSeason>>,
}

impl AggregationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one episode under `key`.
    ///
    /// Returns `true` when this is the first episode of a new burst, which
    /// is the caller's cue to arm a flush timer. An existing entry keeps the
    /// series name it was created with; later events cannot rename a burst
    /// mid-accumulation.
    pub fn upsert(&self, key: &SeasonKey, series_name: &str, episode: Episode) -> bool {
        let mut inner = self.inner.lock();
        match inner.get_mut(key) {
            Some(pending) => {
                pending.episodes.push(episode);
                false
            }
            None => {
                inner.insert(key.clone(), PendingSeason::new(series_name, episode));
                true
            }
        }
    }

    /// Atomically removes and returns the accumulated state for `key`.
    ///
    /// `None` means the burst was already flushed or never existed; callers
    /// treat that as a no-op, not an error. After a drain, a new event for
    /// the same key starts a fresh burst with its own timer.
    pub fn drain(&self, key: &SeasonKey) -> Option<PendingSeason> {
        self.inner.lock().remove(key)
    }

    /// Number of keys currently accumulating.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
