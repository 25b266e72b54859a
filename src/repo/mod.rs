//! External collaborator ports.
//!
//! The engine owns registrations, waitlists and the payment ledger; user
//! profiles, the event record and real money movement belong to other
//! services. Those are reached through the traits here, with in-memory
//! implementations in [`memory`] for tests and embedding.
//!
//! ## Example
//!
//! ```
//! use padel_events::repo::{InMemoryDirectory, UserDirectory};
//! use padel_events::user::User;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let directory = InMemoryDirectory::new();
//! let ana = User::new("Ana", 3.5);
//! let ana_id = ana.id;
//! directory.upsert(ana).await;
//!
//! let profile = directory.get_profile(ana_id).await.unwrap();
//! assert_eq!(profile.rank, 3.5);
//! # }
//! ```

pub mod memory;

use async_trait::async_trait;

use crate::errors::EngineResult;
use crate::event::models::{Event, EventId};
use crate::payment::models::Charge;
use crate::user::{User, UserId};

/// Read access to player profiles
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a profile by ID
    async fn get_profile(&self, user_id: UserId) -> EngineResult<User>;

    /// Fetch just the rating
    async fn get_rank(&self, user_id: UserId) -> EngineResult<f64> {
        Ok(self.get_profile(user_id).await?.rank)
    }
}

/// The system of record for events
///
/// The engine reads events through `get` and writes back status and result
/// changes through `put`; it never creates or deletes events.
#[async_trait]
pub trait EventCatalog: Send + Sync {
    /// Fetch an event by ID
    async fn get(&self, event_id: EventId) -> EngineResult<Event>;

    /// Persist an updated event
    async fn put(&self, event: Event) -> EngineResult<()>;
}

/// Charge creation at the payment provider
///
/// Capture, refunds and webhook signing stay on the provider side; the
/// engine only opens charges and ingests the resulting status updates.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a charge and get back its gateway ID and checkout link
    async fn create_charge(&self, amount: i64, description: &str) -> EngineResult<Charge>;
}

pub use memory::{InMemoryCatalog, InMemoryDirectory, StaticGateway};
