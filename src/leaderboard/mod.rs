//! Final standings for completed events.
//!
//! This module provides:
//! - An editor keeping places contiguous through adds, removes and swaps
//! - Validation of a finishing order against the event's participants
//!
//! ## Example
//!
//! ```
//! use padel_events::leaderboard::LeaderboardEditor;
//! use uuid::Uuid;
//!
//! let winner = Uuid::new_v4();
//! let runner_up = Uuid::new_v4();
//!
//! let mut editor = LeaderboardEditor::from_order(&[runner_up, winner]);
//! editor.move_up(winner);
//!
//! let result = editor.into_result();
//! assert_eq!(result.leaderboard[0].user_id, winner);
//! assert_eq!(result.leaderboard[0].place, 1);
//! ```

pub mod editor;

pub use editor::{LeaderboardEditor, validate_order};
