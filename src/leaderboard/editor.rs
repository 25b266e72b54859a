//! Final standings editor.
//!
//! Places are always contiguous 1..N: every mutation renumbers the whole
//! list, so a partial update can never leave gaps or duplicate places.

use std::collections::HashSet;

use crate::errors::{EngineError, EngineResult};
use crate::event::models::{EventResult, LeaderboardEntry};
use crate::user::UserId;

/// Check a proposed standings order against the event's participants
pub fn validate_order(ordered: &[UserId], participants: &HashSet<UserId>) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(ordered.len());
    for user_id in ordered {
        if !seen.insert(*user_id) {
            return Err(EngineError::InvalidLeaderboard(format!(
                "user {user_id} appears more than once"
            )));
        }
        if !participants.contains(user_id) {
            return Err(EngineError::InvalidLeaderboard(format!(
                "user {user_id} did not take part in the event"
            )));
        }
    }
    Ok(())
}

/// Ordered standings under construction
#[derive(Debug, Clone, Default)]
pub struct LeaderboardEditor {
    entries: Vec<LeaderboardEntry>,
}

impl LeaderboardEditor {
    /// Start from an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume editing a previously saved result
    pub fn from_result(result: &EventResult) -> Self {
        let mut editor = Self {
            entries: result.leaderboard.clone(),
        };
        editor.renumber();
        editor
    }

    /// Build a board from a finishing order, first place first
    pub fn from_order(ordered: &[UserId]) -> Self {
        let entries = ordered
            .iter()
            .enumerate()
            .map(|(idx, user_id)| LeaderboardEntry {
                place: idx as u32 + 1,
                user_id: *user_id,
            })
            .collect();
        Self { entries }
    }

    /// Number of placed users
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the board is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the user is already placed
    pub fn contains(&self, user_id: UserId) -> bool {
        self.entries.iter().any(|entry| entry.user_id == user_id)
    }

    /// Append a user in last place, false if already placed
    pub fn add(&mut self, user_id: UserId) -> bool {
        if self.contains(user_id) {
            return false;
        }
        self.entries.push(LeaderboardEntry {
            place: self.entries.len() as u32 + 1,
            user_id,
        });
        true
    }

    /// Drop a user and close the gap, false if absent
    pub fn remove(&mut self, user_id: UserId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.user_id != user_id);
        if self.entries.len() == before {
            return false;
        }
        self.renumber();
        true
    }

    /// Swap a user with the one placed above, false if absent or first
    pub fn move_up(&mut self, user_id: UserId) -> bool {
        let Some(idx) = self.position(user_id) else {
            return false;
        };
        if idx == 0 {
            return false;
        }
        self.entries.swap(idx - 1, idx);
        self.renumber();
        true
    }

    /// Swap a user with the one placed below, false if absent or last
    pub fn move_down(&mut self, user_id: UserId) -> bool {
        let Some(idx) = self.position(user_id) else {
            return false;
        };
        if idx + 1 >= self.entries.len() {
            return false;
        }
        self.entries.swap(idx, idx + 1);
        self.renumber();
        true
    }

    /// Current entries, ordered by place
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Finish editing
    pub fn into_result(self) -> EventResult {
        EventResult {
            leaderboard: self.entries,
        }
    }

    fn position(&self, user_id: UserId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.user_id == user_id)
    }

    fn renumber(&mut self) {
        for (idx, entry) in self.entries.iter_mut().enumerate() {
            entry.place = idx as u32 + 1;
        }
    }
}
