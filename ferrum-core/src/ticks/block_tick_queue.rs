//! Pending block ticks keyed by position.
//!
//! Each position holds at most one due time. Scheduling an already pending
//! position replaces its due time, so the last writer wins.

use ferrum_utils::BlockPos;
use scc::HashMap;

/// Concurrent map from position to the game tick a block tick is due at.
///
/// Scheduling and draining interleave without external locking: block
/// callbacks may schedule while the tick loop drains.
pub struct BlockTickQueue {
    pending: HashMap<BlockPos, u64>,
}

impl BlockTickQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Sets the due tick of `pos`, replacing any pending entry.
    pub fn schedule(&self, pos: BlockPos, due: u64) {
        self.pending.upsert_sync(pos, due);
        log::trace!("Scheduled block tick at {pos} for tick {due}");
    }

    /// Removes and returns every position due at or before `now`.
    ///
    /// Keys are collected first and each is removed only if still due, so a
    /// reschedule that lands between the two steps survives. Order is unspecified.
    pub fn drain_due(&self, now: u64) -> Vec<BlockPos> {
        let mut due = Vec::new();
        self.pending.iter_sync(|pos, at| {
            if *at <= now {
                due.push(*pos);
            }
            true
        });
        due.retain(|pos| self.pending.remove_if_sync(pos, |at| *at <= now).is_some());
        due
    }

    /// The due tick pending for `pos`.
    #[must_use]
    pub fn due_at(&self, pos: BlockPos) -> Option<u64> {
        self.pending.read_sync(&pos, |_, at| *at)
    }

    /// Number of pending ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no tick is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending tick.
    pub fn clear(&self) {
        self.pending.clear_sync();
    }
}

impl Default for BlockTickQueue {
    fn default() -> Self {
        Self::new()
    }
}
