//! Registration and lifecycle engine.
//!
//! This module provides:
//! - The [`EventEngine`] service exposing joins, withdrawals, status
//!   changes, payments, event lifecycle and standings
//! - Per-event locking so capacity checks and waitlist promotion are atomic
//! - Webhook ingestion that is idempotent under re-delivery
//!
//! ## Example
//!
//! ```
//! use padel_events::engine::{EventEngine, JoinOutcome};
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
//!
//! let ana = User::new("Ana", 3.0);
//! let ana_id = ana.id;
//! directory.upsert(ana).await;
//!
//! let event = Event::new("Evening game", EventType::Game, 2.0, 4.0, 0, 4, Utc::now());
//! let event_id = event.id;
//! catalog.insert(event).await?;
//!
//! let engine = EventEngine::new(directory, catalog, Arc::new(StaticGateway::new()));
//! let outcome = engine.join_event(ana_id, event_id).await?;
//! assert!(matches!(outcome, JoinOutcome::Registered(_)));
//! # Ok(())
//! # }
//! ```

pub mod manager;
pub mod store;

pub use manager::{EventEngine, JoinOutcome, RegistrationFilter};
pub use store::{EventRecords, EventStore};
