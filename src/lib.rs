//! # Padel Events
//!
//! Registration and waitlist lifecycle engine for a padel booking platform.
//!
//! This library decides who may join a capacity-limited event, moves
//! registrations through per-type status transitions, attaches payment
//! attempts to tournament entries, promotes the waitlist when a slot frees
//! up and keeps the event's own status consistent with its registration
//! count. Per-type rules are dispatched through `enum_dispatch` policies;
//! every mutating operation runs under its event's lock.
//!
//! ## Lifecycle
//!
//! - **Games**: joining holds a slot as `Invited`; the player moves to
//!   `Confirmed`, and leaves as `Left` or `Cancelled`
//! - **Tournaments**: joining holds a slot as `Pending`; a succeeded
//!   payment unlocks `Confirmed`, withdrawal becomes
//!   `CancelledBeforePayment` or `Refunded`
//! - **Waitlist**: joins beyond capacity queue up FIFO and are promoted in
//!   join order the moment a slot frees
//! - **Events**: `Registration` and `Full` toggle automatically with the
//!   active count; `Completed` and `Cancelled` are manual and terminal,
//!   and completed events can carry final standings
//!
//! ## Core Modules
//!
//! - [`engine`]: The orchestrating service and its per-event shards
//! - [`registration`]: Status domain and per-type transition tables
//! - [`payment`]: Payment attempts and the idempotent webhook ledger
//! - [`waitlist`]: The FIFO queue
//! - [`repo`]: Ports to the profile directory, event catalog and gateway
//!
//! ## Example
//!
//! ```
//! use padel_events::{EventEngine, JoinOutcome};
//! use padel_events::event::{Event, EventType};
//! use padel_events::repo::{InMemoryCatalog, InMemoryDirectory, StaticGateway};
//! use padel_events::user::User;
//! use chrono::Utc;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = Arc::new(InMemoryDirectory::new());
//! let catalog = Arc::new(InMemoryCatalog::new());
//! let engine = EventEngine::new(
//!     directory.clone(),
//!     catalog.clone(),
//!     Arc::new(StaticGateway::new()),
//! );
//!
//! let ana = User::new("Ana", 3.0);
//! let ana_id = ana.id;
//! directory.upsert(ana).await;
//!
//! let event = Event::new("Evening game", EventType::Game, 2.0, 4.0, 0, 4, Utc::now());
//! let event_id = event.id;
//! catalog.insert(event).await?;
//!
//! match engine.join_event(ana_id, event_id).await? {
//!     JoinOutcome::Registered(registration) => println!("in as {}", registration.status),
//!     JoinOutcome::Waitlisted(entry) => println!("queued since {}", entry.joined_at),
//! }
//! # Ok(())
//! # }
//! ```

/// Rating window checks for registration.
pub mod eligibility;

/// The orchestrating engine and its per-event record shards.
pub mod engine;
pub use engine::{EventEngine, EventRecords, EventStore, JoinOutcome, RegistrationFilter};

/// Error taxonomy shared by every operation.
pub mod errors;
pub use errors::{EngineError, EngineResult, Resource};

/// Event models and status lifecycle.
pub mod event;

/// Final standings editing and validation.
pub mod leaderboard;

/// Payment attempts and the per-event ledger.
pub mod payment;

/// Registration records and per-type transition policies.
pub mod registration;

/// Collaborator ports and in-memory implementations.
pub mod repo;

/// Player profile models.
pub mod user;

/// The FIFO waitlist.
pub mod waitlist;
