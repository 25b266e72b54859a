//! In-memory collaborator implementations.
//!
//! Hermetic stand-ins for the real services, used by the test suite and by
//! embedders that keep everything in one process.

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::sync::RwLock;

use super::{EventCatalog, PaymentGateway, UserDirectory};
use crate::errors::{EngineError, EngineResult, Resource};
use crate::event::models::{Event, EventId};
use crate::payment::models::Charge;
use crate::user::{User, UserId};

/// Profile directory backed by a map
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a profile
    pub async fn upsert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn get_profile(&self, user_id: UserId) -> EngineResult<User> {
        self.users
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or(EngineError::NotFound(Resource::User(user_id)))
    }
}

/// Event record backed by a map
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    events: RwLock<HashMap<EventId, Event>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new event, validating its configuration first
    pub async fn insert(&self, event: Event) -> EngineResult<()> {
        event.validate()?;
        self.events.write().await.insert(event.id, event);
        Ok(())
    }
}

#[async_trait]
impl EventCatalog for InMemoryCatalog {
    async fn get(&self, event_id: EventId) -> EngineResult<Event> {
        self.events
            .read()
            .await
            .get(&event_id)
            .cloned()
            .ok_or(EngineError::NotFound(Resource::Event(event_id)))
    }

    async fn put(&self, event: Event) -> EngineResult<()> {
        self.events.write().await.insert(event.id, event);
        Ok(())
    }
}

/// Gateway that mints deterministic charges without talking to anyone
#[derive(Debug, Default)]
pub struct StaticGateway {
    counter: AtomicU64,
}

impl StaticGateway {
    /// Create a gateway counting from 1
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentGateway for StaticGateway {
    async fn create_charge(&self, _amount: i64, _description: &str) -> EngineResult<Charge> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(Charge {
            payment_id: format!("test-payment-{n:06}"),
            payment_link: format!("https://payments.test/checkout/{n:06}"),
        })
    }
}
