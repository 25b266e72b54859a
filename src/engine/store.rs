//! Per-event record shards.
//!
//! Every event gets its own mutex around everything the engine owns for it,
//! so read-check-write sequences on one event are atomic while unrelated
//! events never contend. The outer map lock is only ever held long enough
//! to fetch or create a shard.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};

use crate::event::models::EventId;
use crate::payment::ledger::PaymentLedger;
use crate::registration::{
    models::Registration,
    policy::{EventPolicy, RegistrationPolicy},
};
use crate::user::UserId;
use crate::waitlist::queue::WaitlistQueue;

/// Everything the engine owns for one event
#[derive(Debug, Default)]
pub struct EventRecords {
    /// Registrations by user; entries are revived, never deleted
    pub registrations: HashMap<UserId, Registration>,
    /// FIFO waitlist
    pub waitlist: WaitlistQueue,
    /// Payment attempts
    pub ledger: PaymentLedger,
}

impl EventRecords {
    /// Create empty records
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations currently holding a slot
    pub fn active_count(&self, policy: EventPolicy) -> usize {
        self.registrations
            .values()
            .filter(|reg| policy.occupies_slot(reg.status))
            .count()
    }

    /// Whether one more slot can be taken
    pub fn has_capacity(&self, policy: EventPolicy, max_users: usize) -> bool {
        self.active_count(policy) < max_users
    }
}

/// Shard map giving each event its own lock
#[derive(Debug, Default)]
pub struct EventStore {
    /// Per-event records
    shards: RwLock<HashMap<EventId, Arc<Mutex<EventRecords>>>>,
    /// Gateway payment ID to owning event, for webhook routing
    payment_index: RwLock<HashMap<String, EventId>>,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the shard for an event, creating it on first touch
    pub async fn shard(&self, event_id: EventId) -> Arc<Mutex<EventRecords>> {
        if let Some(shard) = self.shards.read().await.get(&event_id) {
            return shard.clone();
        }
        let mut shards = self.shards.write().await;
        shards
            .entry(event_id)
            .or_insert_with(|| Arc::new(Mutex::new(EventRecords::new())))
            .clone()
    }

    /// Fetch the shard for an event only if it already exists
    pub async fn existing_shard(&self, event_id: EventId) -> Option<Arc<Mutex<EventRecords>>> {
        self.shards.read().await.get(&event_id).cloned()
    }

    /// Snapshot of every shard, for cross-event queries
    pub async fn all_shards(&self) -> Vec<Arc<Mutex<EventRecords>>> {
        self.shards.read().await.values().cloned().collect()
    }

    /// Remember which event a gateway payment belongs to
    pub async fn index_payment(&self, payment_id: String, event_id: EventId) {
        self.payment_index.write().await.insert(payment_id, event_id);
    }

    /// Route a gateway payment ID to its owning event
    pub async fn event_for_payment(&self, payment_id: &str) -> Option<EventId> {
        self.payment_index.read().await.get(payment_id).copied()
    }
}
