//! FIFO waitlist for full events.
//!
//! This module provides:
//! - Waitlist entries timestamped at join time
//! - A strictly first-in-first-out queue with duplicate protection
//! - Promotion-order iteration used when a slot frees up
//!
//! ## Example
//!
//! ```
//! use padel_events::waitlist::{WaitlistEntry, WaitlistQueue};
//! use uuid::Uuid;
//!
//! let event_id = Uuid::new_v4();
//! let mut queue = WaitlistQueue::new();
//! queue.push(WaitlistEntry::new(Uuid::new_v4(), event_id));
//! queue.push(WaitlistEntry::new(Uuid::new_v4(), event_id));
//!
//! // The first user in is the first promoted out.
//! let next = queue.pop_next().unwrap();
//! assert_eq!(queue.len(), 1);
//! assert!(!queue.contains(next.user_id));
//! ```

pub mod models;
pub mod queue;

pub use models::WaitlistEntry;
pub use queue::WaitlistQueue;
