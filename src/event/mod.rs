//! Event models and status lifecycle.
//!
//! This module provides:
//! - Event, result and leaderboard data models
//! - Event configuration validation
//! - The `Registration`/`Full` capacity toggle and the manual
//!   `Completed`/`Cancelled` transitions
//!
//! ## Example
//!
//! ```
//! use padel_events::event::{lifecycle, Event, EventStatus, EventType};
//! use chrono::Utc;
//!
//! let mut event = Event::new("Evening game", EventType::Game, 2.0, 4.5, 0, 4, Utc::now());
//! event.validate().unwrap();
//!
//! // The Registration/Full pair follows the active registration count.
//! assert!(lifecycle::sync_with_capacity(&mut event, 4));
//! assert_eq!(event.status, EventStatus::Full);
//! ```

pub mod lifecycle;
pub mod models;

pub use models::{
    Event, EventData, EventId, EventResult, EventStatus, EventType, LeaderboardEntry,
};
