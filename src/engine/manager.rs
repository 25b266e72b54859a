//! The event engine: registration, waitlist and lifecycle orchestration.
//!
//! Every mutating operation locks the event's shard before reading any
//! state, so the read-check-write sequence it performs is atomic with
//! respect to every other operation on the same event. Waitlist promotion
//! runs inside the vacating operation's critical section; no caller can
//! observe a free slot between the two.

use chrono::Utc;
use log::{debug, info};
use std::{collections::HashSet, sync::Arc};

use super::store::{EventRecords, EventStore};
use crate::eligibility;
use crate::errors::{EngineError, EngineResult, Resource};
use crate::event::{
    lifecycle,
    models::{Event, EventId, EventStatus},
};
use crate::leaderboard::editor::{self, LeaderboardEditor};
use crate::payment::{
    ledger::LedgerUpdate,
    models::{Payment, PaymentStatus},
};
use crate::registration::{
    models::{Registration, RegistrationStatus},
    policy::{EventPolicy, RegistrationPolicy},
};
use crate::repo::{EventCatalog, PaymentGateway, UserDirectory};
use crate::user::UserId;
use crate::waitlist::models::WaitlistEntry;

/// How a join attempt was accommodated
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    /// A slot was free; the user holds it now
    Registered(Registration),
    /// The event was full; the user queued up
    Waitlisted(WaitlistEntry),
}

impl JoinOutcome {
    /// The registration, if a slot was taken
    pub fn registration(&self) -> Option<&Registration> {
        match self {
            Self::Registered(registration) => Some(registration),
            Self::Waitlisted(_) => None,
        }
    }
}

/// Filter for registration queries
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationFilter {
    /// Only this event
    pub event_id: Option<EventId>,
    /// Only this user
    pub user_id: Option<UserId>,
    /// Only this status
    pub status: Option<RegistrationStatus>,
}

impl RegistrationFilter {
    /// Filter down to one event
    pub fn for_event(event_id: EventId) -> Self {
        Self {
            event_id: Some(event_id),
            ..Self::default()
        }
    }

    fn matches(&self, registration: &Registration) -> bool {
        self.event_id.is_none_or(|id| registration.event_id == id)
            && self.user_id.is_none_or(|id| registration.user_id == id)
            && self.status.is_none_or(|status| registration.status == status)
    }
}

/// Registration and lifecycle engine
///
/// Owns registrations, waitlists and payment ledgers; reads profiles and
/// events through the collaborator traits and writes event status changes
/// back through the catalog.
#[derive(Clone)]
pub struct EventEngine {
    /// Profile directory
    users: Arc<dyn UserDirectory>,
    /// Event system of record
    events: Arc<dyn EventCatalog>,
    /// Payment provider
    gateway: Arc<dyn PaymentGateway>,
    /// Per-event records
    store: Arc<EventStore>,
}

impl EventEngine {
    /// Create a new engine
    ///
    /// # Arguments
    ///
    /// * `users` - Profile directory
    /// * `events` - Event system of record
    /// * `gateway` - Payment provider
    pub fn new(
        users: Arc<dyn UserDirectory>,
        events: Arc<dyn EventCatalog>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            users,
            events,
            gateway,
            store: Arc::new(EventStore::new()),
        }
    }

    /// Register a user for an event, or queue them when it is full
    ///
    /// Checks the rating window, rejects duplicates, then either takes a
    /// slot in the type's initial status or appends to the waitlist. A
    /// terminal registration left from an earlier withdrawal is revived
    /// in place, so history survives re-joins.
    pub async fn join_event(&self, user_id: UserId, event_id: EventId) -> EngineResult<JoinOutcome> {
        let shard = self.store.shard(event_id).await;
        let mut records = shard.lock().await;

        let mut event = self.events.get(event_id).await?;
        if lifecycle::is_terminal(event.status) {
            return Err(EngineError::TerminalEventState(event.status));
        }

        let user = self.users.get_profile(user_id).await?;
        eligibility::check(&user, &event)?;

        let policy = EventPolicy::for_event_type(event.event_type);
        if let Some(existing) = records.registrations.get(&user_id)
            && policy.occupies_slot(existing.status)
        {
            return Err(EngineError::DuplicateRegistration);
        }
        if records.waitlist.contains(user_id) {
            return Err(EngineError::DuplicateWaitlist);
        }

        if !records.has_capacity(policy, event.max_users) {
            let entry = WaitlistEntry::new(user_id, event_id);
            records.waitlist.push(entry.clone());
            info!(
                "user {user_id} waitlisted for event {event_id} ({} waiting)",
                records.waitlist.len()
            );
            return Ok(JoinOutcome::Waitlisted(entry));
        }

        let registration = admit(&mut records, &event, policy, user_id)?;
        info!(
            "user {user_id} registered for event {event_id} as {}",
            registration.status
        );
        self.sync_event(&mut records, &mut event, policy).await?;
        Ok(JoinOutcome::Registered(registration))
    }

    /// Withdraw a user's registration
    ///
    /// Games mark the player `Left`; tournaments fall back to
    /// `CancelledBeforePayment` or `Refunded` depending on how far the
    /// entry got. The freed slot is offered to the waitlist before the
    /// lock releases.
    pub async fn leave_or_cancel(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> EngineResult<Registration> {
        let shard = self.store.shard(event_id).await;
        let mut records = shard.lock().await;

        let mut event = self.events.get(event_id).await?;
        if lifecycle::is_terminal(event.status) {
            return Err(EngineError::TerminalEventState(event.status));
        }
        let policy = EventPolicy::for_event_type(event.event_type);

        let (registration, from, vacated) = {
            let reg = records
                .registrations
                .get_mut(&user_id)
                .ok_or(EngineError::NotFound(Resource::Registration(user_id)))?;
            let from = reg.status;
            let target = policy.leave_target(from);
            if !policy.can_transition(from, target) {
                return Err(EngineError::InvalidTransition { from, to: target });
            }
            reg.set_status(target);
            (
                reg.clone(),
                from,
                policy.occupies_slot(from) && !policy.occupies_slot(target),
            )
        };

        info!(
            "user {user_id} withdrew from event {event_id}: {from} -> {}",
            registration.status
        );
        if registration.status == RegistrationStatus::Refunded {
            info!("refund due for user {user_id} on event {event_id}");
        }

        if vacated {
            self.promote_from_waitlist(&mut records, &event, policy).await;
        }
        self.sync_event(&mut records, &mut event, policy).await?;
        Ok(registration)
    }

    /// Move a registration to an explicit status
    ///
    /// The per-type table is the single gate: anything it does not list is
    /// rejected. Confirming a paid tournament entry additionally requires
    /// a succeeded payment, and re-entering a slot from a terminal status
    /// re-checks capacity.
    pub async fn change_registration_status(
        &self,
        user_id: UserId,
        event_id: EventId,
        target: RegistrationStatus,
    ) -> EngineResult<Registration> {
        let shard = self.store.shard(event_id).await;
        let mut records = shard.lock().await;

        let mut event = self.events.get(event_id).await?;
        if lifecycle::is_terminal(event.status) {
            return Err(EngineError::TerminalEventState(event.status));
        }
        let policy = EventPolicy::for_event_type(event.event_type);

        let from = records
            .registrations
            .get(&user_id)
            .ok_or(EngineError::NotFound(Resource::Registration(user_id)))?
            .status;

        if !policy.can_transition(from, target) {
            return Err(EngineError::InvalidTransition { from, to: target });
        }
        if policy.payment_gated(&event, from, target) && !records.ledger.is_paid(user_id) {
            return Err(EngineError::PaymentRequired);
        }

        let occupied = policy.occupies_slot(from);
        let will_occupy = policy.occupies_slot(target);
        if !occupied && will_occupy && !records.has_capacity(policy, event.max_users) {
            return Err(EngineError::EventFull);
        }

        let registration = {
            let Some(reg) = records.registrations.get_mut(&user_id) else {
                return Err(EngineError::NotFound(Resource::Registration(user_id)));
            };
            reg.set_status(target);
            reg.clone()
        };
        info!("registration for user {user_id} on event {event_id}: {from} -> {target}");

        if occupied && !will_occupy {
            self.promote_from_waitlist(&mut records, &event, policy).await;
        }
        self.sync_event(&mut records, &mut event, policy).await?;
        Ok(registration)
    }

    /// Open a payment attempt for a registration
    ///
    /// One live attempt per registration: a second attempt is rejected
    /// until the first settles, and nothing more can be opened once one
    /// succeeded.
    pub async fn record_payment_attempt(
        &self,
        user_id: UserId,
        event_id: EventId,
        amount: i64,
    ) -> EngineResult<Payment> {
        let shard = self.store.shard(event_id).await;
        let mut records = shard.lock().await;

        let event = self.events.get(event_id).await?;
        if lifecycle::is_terminal(event.status) {
            return Err(EngineError::TerminalEventState(event.status));
        }
        if !records.registrations.contains_key(&user_id) {
            return Err(EngineError::NotFound(Resource::Registration(user_id)));
        }
        if !records.ledger.is_payable(user_id) {
            return Err(EngineError::DuplicatePayment);
        }

        let description = format!("entry fee for {}", event.name);
        let charge = self.gateway.create_charge(amount, &description).await?;
        let payment = Payment::from_charge(charge, user_id, event_id, amount);

        if !records.ledger.record_attempt(payment.clone()) {
            return Err(EngineError::DuplicatePayment);
        }
        self.store
            .index_payment(payment.payment_id.clone(), event_id)
            .await;
        info!(
            "payment attempt {} opened for user {user_id} on event {event_id}",
            payment.payment_id
        );
        Ok(payment)
    }

    /// Ingest a payment status update from the gateway
    ///
    /// Idempotent: re-deliveries and regressions from settled statuses are
    /// acknowledged without changing anything. A succeeded payment
    /// confirms the owning `Pending` registration at most once.
    pub async fn apply_gateway_update(
        &self,
        payment_id: &str,
        status: PaymentStatus,
    ) -> EngineResult<Payment> {
        let event_id = self
            .store
            .event_for_payment(payment_id)
            .await
            .ok_or_else(|| EngineError::NotFound(Resource::Payment(payment_id.to_string())))?;

        let shard = self.store.shard(event_id).await;
        let mut records = shard.lock().await;

        let update = records
            .ledger
            .apply_update(payment_id, status)
            .ok_or_else(|| EngineError::NotFound(Resource::Payment(payment_id.to_string())))?;

        let payment = match update {
            LedgerUpdate::Unchanged(payment) => {
                debug!(
                    "payment {payment_id} already settled as {}; update to {status} ignored",
                    payment.status
                );
                return Ok(payment);
            }
            LedgerUpdate::Applied(payment) => payment,
        };
        info!("payment {payment_id} moved to {status}");

        if status == PaymentStatus::Succeeded
            && let Some(reg) = records.registrations.get_mut(&payment.user_id)
            && reg.status == RegistrationStatus::Pending
        {
            reg.set_status(RegistrationStatus::Confirmed);
            info!(
                "registration for user {} on event {event_id} confirmed by payment {payment_id}",
                payment.user_id
            );
        }

        Ok(payment)
    }

    /// Manually complete or cancel an event
    ///
    /// The `Registration`/`Full` pair is engine-maintained and cannot be
    /// set by hand. Cancelling transitions every slot holder to its
    /// type's cancellation status and drops the whole waitlist; nobody is
    /// promoted during teardown.
    pub async fn set_event_status(
        &self,
        event_id: EventId,
        target: EventStatus,
    ) -> EngineResult<Event> {
        let shard = self.store.shard(event_id).await;
        let mut records = shard.lock().await;

        let mut event = self.events.get(event_id).await?;
        lifecycle::validate_manual_transition(&event, target, Utc::now())?;

        if target == EventStatus::Cancelled {
            let policy = EventPolicy::for_event_type(event.event_type);
            let mut cancelled = 0usize;
            for reg in records.registrations.values_mut() {
                if let Some(next) = policy.cancel_target(reg.status) {
                    reg.set_status(next);
                    cancelled += 1;
                }
            }
            let dropped = records.waitlist.clear();
            info!(
                "event {event_id} cancelled: {cancelled} registrations closed, {dropped} waitlist entries dropped"
            );
        }

        event.status = target;
        self.events.put(event.clone()).await?;
        info!("event {event_id} is now {target}");
        Ok(event)
    }

    /// Record final standings on a completed event
    ///
    /// `ordered` lists user IDs first place first. Every ID must belong to
    /// a participant who held a slot at completion, with no repeats;
    /// places are assigned 1..N from the order. Saving replaces any
    /// previous standings whole.
    pub async fn set_leaderboard(
        &self,
        event_id: EventId,
        ordered: &[UserId],
    ) -> EngineResult<Event> {
        let shard = self.store.shard(event_id).await;
        let records = shard.lock().await;

        let mut event = self.events.get(event_id).await?;
        if event.status != EventStatus::Completed {
            return Err(EngineError::InvalidLeaderboard(format!(
                "event is {}, standings can only be recorded once completed",
                event.status
            )));
        }

        let policy = EventPolicy::for_event_type(event.event_type);
        let participants: HashSet<UserId> = records
            .registrations
            .values()
            .filter(|reg| policy.occupies_slot(reg.status))
            .map(|reg| reg.user_id)
            .collect();
        editor::validate_order(ordered, &participants)?;

        event.data.result = Some(LeaderboardEditor::from_order(ordered).into_result());
        self.events.put(event.clone()).await?;
        info!(
            "standings recorded for event {event_id}: {} places",
            ordered.len()
        );
        Ok(event)
    }

    /// Take a user off an event's waitlist
    ///
    /// A no-op when the user is not waiting.
    pub async fn leave_waitlist(&self, user_id: UserId, event_id: EventId) -> EngineResult<()> {
        let Some(shard) = self.store.existing_shard(event_id).await else {
            return Ok(());
        };
        let mut records = shard.lock().await;
        if records.waitlist.remove(user_id) {
            info!("user {user_id} left the waitlist for event {event_id}");
        }
        Ok(())
    }

    /// Registrations matching a filter, oldest first
    pub async fn list_registrations(&self, filter: RegistrationFilter) -> Vec<Registration> {
        let shards = match filter.event_id {
            Some(event_id) => match self.store.existing_shard(event_id).await {
                Some(shard) => vec![shard],
                None => return Vec::new(),
            },
            None => self.store.all_shards().await,
        };

        let mut registrations = Vec::new();
        for shard in shards {
            let records = shard.lock().await;
            registrations.extend(
                records
                    .registrations
                    .values()
                    .filter(|reg| filter.matches(reg))
                    .cloned(),
            );
        }
        registrations.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        registrations
    }

    /// Waitlist entries for an event in promotion order
    pub async fn list_waitlist(&self, event_id: EventId) -> Vec<WaitlistEntry> {
        match self.store.existing_shard(event_id).await {
            Some(shard) => shard.lock().await.waitlist.snapshot(),
            None => Vec::new(),
        }
    }

    /// Payment attempts for a registration, newest first
    pub async fn list_payments(&self, user_id: UserId, event_id: EventId) -> Vec<Payment> {
        match self.store.existing_shard(event_id).await {
            Some(shard) => shard.lock().await.ledger.payments(user_id),
            None => Vec::new(),
        }
    }

    /// Offer freed capacity to the waitlist, strictly in FIFO order
    ///
    /// An entry that can no longer be admitted is discarded, not requeued,
    /// and the offer moves to the next one. Bounded by the queue length at
    /// entry, so a promotion pass always terminates.
    async fn promote_from_waitlist(
        &self,
        records: &mut EventRecords,
        event: &Event,
        policy: EventPolicy,
    ) {
        let mut remaining = records.waitlist.len();
        while remaining > 0 && records.has_capacity(policy, event.max_users) {
            remaining -= 1;
            let Some(entry) = records.waitlist.pop_next() else {
                break;
            };

            let user = match self.users.get_profile(entry.user_id).await {
                Ok(user) => user,
                Err(err) => {
                    info!(
                        "discarding waitlist entry for user {}: {err}",
                        entry.user_id
                    );
                    continue;
                }
            };
            if !eligibility::is_eligible(user.rank, event) {
                info!(
                    "discarding waitlist entry for user {}: rank {} now outside {} to {}",
                    entry.user_id, user.rank, event.rank_min, event.rank_max
                );
                continue;
            }

            match admit(records, event, policy, entry.user_id) {
                Ok(registration) => {
                    info!(
                        "user {} promoted from the waitlist for event {} as {}",
                        entry.user_id, event.id, registration.status
                    );
                }
                Err(err) => {
                    info!(
                        "discarding waitlist entry for user {}: {err}",
                        entry.user_id
                    );
                }
            }
        }
    }

    /// Re-derive the event's `Registration`/`Full` status and persist a change
    async fn sync_event(
        &self,
        records: &mut EventRecords,
        event: &mut Event,
        policy: EventPolicy,
    ) -> EngineResult<()> {
        if lifecycle::sync_with_capacity(event, records.active_count(policy)) {
            info!("event {} is now {}", event.id, event.status);
            self.events.put(event.clone()).await?;
        }
        Ok(())
    }
}

/// Take a slot in the type's initial status, reviving a terminal record
/// when one exists
fn admit(
    records: &mut EventRecords,
    event: &Event,
    policy: EventPolicy,
    user_id: UserId,
) -> EngineResult<Registration> {
    let initial = policy.initial_status(event);
    if let Some(existing) = records.registrations.get_mut(&user_id) {
        if policy.occupies_slot(existing.status) {
            return Err(EngineError::DuplicateRegistration);
        }
        if !policy.can_transition(existing.status, initial) {
            return Err(EngineError::InvalidTransition {
                from: existing.status,
                to: initial,
            });
        }
        existing.set_status(initial);
        return Ok(existing.clone());
    }

    let registration = Registration::new(user_id, event.id, initial);
    records.registrations.insert(user_id, registration.clone());
    Ok(registration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn registration(status: RegistrationStatus) -> Registration {
        Registration::new(Uuid::new_v4(), Uuid::new_v4(), status)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = RegistrationFilter::default();
        assert!(filter.matches(&registration(RegistrationStatus::Pending)));
        assert!(filter.matches(&registration(RegistrationStatus::Left)));
    }

    #[test]
    fn test_filter_narrows_by_each_field() {
        let reg = registration(RegistrationStatus::Confirmed);

        let by_event = RegistrationFilter::for_event(reg.event_id);
        assert!(by_event.matches(&reg));
        assert!(!RegistrationFilter::for_event(Uuid::new_v4()).matches(&reg));

        let by_user = RegistrationFilter {
            user_id: Some(reg.user_id),
            ..Default::default()
        };
        assert!(by_user.matches(&reg));

        let by_status = RegistrationFilter {
            status: Some(RegistrationStatus::Pending),
            ..Default::default()
        };
        assert!(!by_status.matches(&reg));
    }

    #[test]
    fn test_join_outcome_accessor() {
        let reg = registration(RegistrationStatus::Invited);
        let outcome = JoinOutcome::Registered(reg.clone());
        assert_eq!(outcome.registration(), Some(&reg));

        let queued = JoinOutcome::Waitlisted(WaitlistEntry::new(reg.user_id, reg.event_id));
        assert_eq!(queued.registration(), None);
    }
}
