//! FIFO waitlist for full events.

use std::collections::VecDeque;

use super::models::WaitlistEntry;
use crate::user::UserId;

/// First-in-first-out waitlist for one event
///
/// Promotion order is by `joined_at` ascending with insertion order breaking
/// ties. Rating never reorders the queue.
#[derive(Debug, Clone, Default)]
pub struct WaitlistQueue {
    entries: VecDeque<WaitlistEntry>,
}

impl WaitlistQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of waiting users
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nobody is waiting
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the user is already queued
    pub fn contains(&self, user_id: UserId) -> bool {
        self.entries.iter().any(|entry| entry.user_id == user_id)
    }

    /// Queue an entry at the tail
    ///
    /// Returns false without queuing when the user is already present.
    pub fn push(&mut self, entry: WaitlistEntry) -> bool {
        if self.contains(entry.user_id) {
            return false;
        }
        self.entries.push_back(entry);
        true
    }

    /// Drop a user's entry, true if one was present
    pub fn remove(&mut self, user_id: UserId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.user_id != user_id);
        before != self.entries.len()
    }

    /// Take the next entry in promotion order
    ///
    /// Entries normally arrive in `joined_at` order, but restored state may
    /// not, so this scans for the earliest timestamp and keeps the first of
    /// any ties.
    pub fn pop_next(&mut self) -> Option<WaitlistEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let mut best_idx = 0;
        for (idx, entry) in self.entries.iter().enumerate().skip(1) {
            if entry.joined_at < self.entries[best_idx].joined_at {
                best_idx = idx;
            }
        }
        self.entries.remove(best_idx)
    }

    /// Entries in promotion order
    pub fn snapshot(&self) -> Vec<WaitlistEntry> {
        let mut entries: Vec<WaitlistEntry> = self.entries.iter().cloned().collect();
        entries.sort_by_key(|entry| entry.joined_at);
        entries
    }

    /// Drop everything, returning how many entries were waiting
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn entry(joined_offset_secs: i64) -> WaitlistEntry {
        WaitlistEntry {
            user_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            joined_at: Utc::now() + Duration::seconds(joined_offset_secs),
        }
    }

    #[test]
    fn test_pop_follows_join_order() {
        let mut queue = WaitlistQueue::new();
        let first = entry(0);
        let second = entry(1);
        let third = entry(2);
        queue.push(first.clone());
        queue.push(second.clone());
        queue.push(third.clone());

        assert_eq!(queue.pop_next().unwrap().user_id, first.user_id);
        assert_eq!(queue.pop_next().unwrap().user_id, second.user_id);
        assert_eq!(queue.pop_next().unwrap().user_id, third.user_id);
        assert!(queue.pop_next().is_none());
    }

    #[test]
    fn test_pop_orders_by_timestamp_not_insertion() {
        let mut queue = WaitlistQueue::new();
        let late = entry(10);
        let early = entry(1);
        queue.push(late.clone());
        queue.push(early.clone());

        assert_eq!(queue.pop_next().unwrap().user_id, early.user_id);
        assert_eq!(queue.pop_next().unwrap().user_id, late.user_id);
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let now = Utc::now();
        let mut queue = WaitlistQueue::new();
        let mut first = entry(0);
        let mut second = entry(0);
        first.joined_at = now;
        second.joined_at = now;
        queue.push(first.clone());
        queue.push(second.clone());

        assert_eq!(queue.pop_next().unwrap().user_id, first.user_id);
        assert_eq!(queue.pop_next().unwrap().user_id, second.user_id);
    }

    #[test]
    fn test_duplicate_user_is_rejected() {
        let mut queue = WaitlistQueue::new();
        let first = entry(0);
        let mut again = entry(5);
        again.user_id = first.user_id;

        assert!(queue.push(first));
        assert!(!queue.push(again));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut queue = WaitlistQueue::new();
        let waiting = entry(0);
        queue.push(waiting.clone());

        assert!(queue.remove(waiting.user_id));
        assert!(!queue.remove(waiting.user_id));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_snapshot_matches_pop_order() {
        let mut queue = WaitlistQueue::new();
        queue.push(entry(3));
        queue.push(entry(1));
        queue.push(entry(2));

        let snapshot = queue.snapshot();
        let mut popped = Vec::new();
        while let Some(next) = queue.pop_next() {
            popped.push(next);
        }
        assert_eq!(snapshot, popped);
    }

    #[test]
    fn test_clear_reports_dropped_count() {
        let mut queue = WaitlistQueue::new();
        queue.push(entry(0));
        queue.push(entry(1));
        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.clear(), 0);
    }
}
