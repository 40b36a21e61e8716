use std::sync::{Mutex, MutexGuard};

use hashbrown::HashMap;

use crate::roster::PlayerId;

/// Per-player handle on the on-screen element, so each tick updates the same
/// line instead of stacking new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTag {
    pub channel_id: String,
    /// Ticks this player has been shown the timer since first sight
    pub updates: u64,
}

/// Tags keyed by player id.
///
/// The lock is held only for a single lookup, insert or removal, never across
/// a display call.
#[derive(Debug, Default)]
pub struct DisplayTagCache {
    tags: Mutex<HashMap<PlayerId, DisplayTag>>,
}

impl DisplayTagCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PlayerId, DisplayTag>> {
        // A panic elsewhere cannot leave a half-written map entry behind
        self.tags.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the player's tag, creating it on first sight, and count this update
    pub fn touch(&self, id: PlayerId, channel_id: &str) -> DisplayTag {
        let mut tags = self.lock();
        let tag = tags.entry(id).or_insert_with(|| DisplayTag {
            channel_id: channel_id.to_string(),
            updates: 0,
        });
        tag.updates += 1;
        tag.clone()
    }

    /// Drop every tag whose player is not in `keep`. Returns how many were evicted.
    pub fn retain_only(&self, keep: &[PlayerId]) -> usize {
        let mut tags = self.lock();
        let before = tags.len();
        tags.retain(|id, _| keep.contains(id));
        before - tags.len()
    }

    pub fn evict(&self, id: PlayerId) -> bool {
        self.lock().remove(&id).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn get(&self, id: PlayerId) -> Option<DisplayTag> {
        self.lock().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
