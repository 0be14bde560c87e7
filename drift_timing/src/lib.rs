// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drift Timing: a host-agnostic timer queue.
//!
//! Frame-driven widgets frequently need "do this N milliseconds from now"
//! behavior (animation completion, delayed media upgrades) without owning a
//! clock or spawning tasks. [`TimerQueue`] keeps a small set of pending
//! deadlines keyed by caller-chosen ids. The host supplies the current time
//! on every call, so the queue never reads a clock itself and stays fully
//! deterministic under test.
//!
//! - Scheduling a key that is already pending replaces its deadline.
//! - [`TimerQueue::pop_due`] returns every key whose deadline is at or
//!   before `now`, earliest first, and removes them.
//! - [`TimerQueue::clear`] drops everything, which is what a view does on
//!   teardown so that no timer can fire after it is gone.
//!
//! ## Minimal example
//!
//! ```rust
//! use drift_timing::TimerQueue;
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! enum Timer {
//!     Upgrade,
//!     Fade,
//! }
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule(Timer::Upgrade, 400);
//! timers.schedule(Timer::Fade, 100);
//!
//! assert!(timers.pop_due(50).is_empty());
//! assert_eq!(timers.pop_due(120).as_slice(), &[Timer::Fade]);
//!
//! timers.cancel(&Timer::Upgrade);
//! assert!(timers.is_empty());
//! ```

use smallvec::SmallVec;

/// A pending deadline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry<K> {
    key: K,
    due: u64,
}

/// Small queue of keyed deadlines expressed in host milliseconds.
///
/// The queue is expected to hold a handful of timers at most, so entries are
/// stored inline and scanned linearly.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    entries: SmallVec<[Entry<K>; 4]>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<K: Copy + PartialEq> TimerQueue<K> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to fire at `due` (host milliseconds).
    ///
    /// If `key` is already pending, its deadline is replaced.
    pub fn schedule(&mut self, key: K, due: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.due = due;
        } else {
            self.entries.push(Entry { key, due });
        }
    }

    /// Cancels `key`, returning `true` if it was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != *key);
        before != self.entries.len()
    }

    /// Returns `true` if `key` is pending.
    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        self.entries.iter().any(|e| e.key == *key)
    }

    /// Returns the deadline of `key`, if pending.
    #[must_use]
    pub fn deadline(&self, key: &K) -> Option<u64> {
        self.entries.iter().find(|e| e.key == *key).map(|e| e.due)
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Removes and returns every key due at or before `now`, earliest first.
    ///
    /// Keys with equal deadlines are returned in scheduling order.
    pub fn pop_due(&mut self, now: u64) -> SmallVec<[K; 4]> {
        let mut due: SmallVec<[Entry<K>; 4]> = SmallVec::new();
        self.entries.retain(|e| {
            if e.due <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        // Stable sort keeps scheduling order for ties.
        due.sort_by_key(|e| e.due);
        due.into_iter().map(|e| e.key).collect()
    }

    /// Drops all pending timers.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;

    #[test]
    fn reschedule_replaces_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(1_u8, 100);
        q.schedule(1_u8, 300);
        assert_eq!(q.len(), 1);
        assert_eq!(q.deadline(&1), Some(300));
        assert!(q.pop_due(200).is_empty());
        assert_eq!(q.pop_due(300).as_slice(), &[1]);
    }

    #[test]
    fn pop_due_orders_by_deadline_then_insertion() {
        let mut q = TimerQueue::new();
        q.schedule('c', 50);
        q.schedule('a', 10);
        q.schedule('b', 10);
        q.schedule('z', 1_000);
        assert_eq!(q.next_deadline(), Some(10));
        assert_eq!(q.pop_due(60).as_slice(), &['a', 'b', 'c']);
        assert!(q.is_pending(&'z'));
    }

    #[test]
    fn cancel_and_clear() {
        let mut q = TimerQueue::new();
        q.schedule(7_u32, 10);
        assert!(q.cancel(&7));
        assert!(!q.cancel(&7));
        q.schedule(8, 10);
        q.schedule(9, 20);
        q.clear();
        assert!(q.is_empty());
        assert!(q.pop_due(u64::MAX).is_empty());
    }
}
