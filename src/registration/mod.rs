//! Registration records and the per-event-type rules that govern them.
//!
//! This module provides:
//! - The shared registration status domain and the registration record
//! - Closed per-type transition tables for games and tournaments
//! - Slot accounting and leave/cancel target selection
//! - The tournament payment gate for confirmations
//!
//! ## Example
//!
//! ```
//! use padel_events::event::{Event, EventType};
//! use padel_events::registration::{EventPolicy, RegistrationPolicy, RegistrationStatus};
//! use chrono::Utc;
//!
//! let event = Event::new(
//!     "City open",
//!     EventType::Tournament,
//!     0.0,
//!     7.0,
//!     2000_00,
//!     16,
//!     Utc::now(),
//! );
//! let policy = EventPolicy::for_event_type(event.event_type);
//!
//! // Paid tournaments hold entries in Pending until a payment succeeds.
//! assert_eq!(policy.initial_status(&event), RegistrationStatus::Pending);
//! assert!(policy.can_transition(RegistrationStatus::Pending, RegistrationStatus::Confirmed));
//! assert!(!policy.can_transition(RegistrationStatus::Refunded, RegistrationStatus::Left));
//! ```

pub mod models;
pub mod policy;

pub use models::{Registration, RegistrationStatus};
pub use policy::{EventPolicy, GamePolicy, RegistrationPolicy, TournamentPolicy};
