//! Per-event payment ledger.
//!
//! Attempts are append-only; gateway webhooks mutate their status through
//! [`PaymentLedger::apply_update`], which is idempotent under re-delivery
//! and ignores regressions from settled statuses.

use log::warn;
use std::collections::HashMap;

use super::models::{Payment, PaymentStatus};
use crate::user::UserId;

/// Outcome of applying a gateway status update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerUpdate {
    /// The status moved to the delivered value
    Applied(Payment),
    /// Re-delivery or a regression from a settled status, nothing changed
    Unchanged(Payment),
}

impl LedgerUpdate {
    /// The payment, whichever way the update went
    pub fn payment(&self) -> &Payment {
        match self {
            Self::Applied(payment) | Self::Unchanged(payment) => payment,
        }
    }
}

/// Payment attempts for one event, grouped by user
#[derive(Debug, Clone, Default)]
pub struct PaymentLedger {
    /// Attempts per user in creation order
    attempts: HashMap<UserId, Vec<Payment>>,
}

impl PaymentLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the user may start a new attempt
    ///
    /// False while any attempt is still active: one live charge per
    /// registration at a time, and nothing more to pay once one succeeded.
    pub fn is_payable(&self, user_id: UserId) -> bool {
        self.attempts
            .get(&user_id)
            .is_none_or(|attempts| attempts.iter().all(|payment| !payment.is_active()))
    }

    /// Whether the user has a succeeded payment
    pub fn is_paid(&self, user_id: UserId) -> bool {
        self.attempts.get(&user_id).is_some_and(|attempts| {
            attempts
                .iter()
                .any(|payment| payment.status == PaymentStatus::Succeeded)
        })
    }

    /// Record a new attempt
    ///
    /// Returns false without recording when the user already has an active
    /// attempt.
    pub fn record_attempt(&mut self, payment: Payment) -> bool {
        if !self.is_payable(payment.user_id) {
            return false;
        }
        self.attempts.entry(payment.user_id).or_default().push(payment);
        true
    }

    /// Apply a gateway status update by gateway payment ID
    ///
    /// Returns `None` when no attempt carries that ID. Settled attempts
    /// never move again; re-deliveries and regressions come back as
    /// [`LedgerUpdate::Unchanged`].
    pub fn apply_update(&mut self, payment_id: &str, status: PaymentStatus) -> Option<LedgerUpdate> {
        let payment = self
            .attempts
            .values_mut()
            .flatten()
            .find(|payment| payment.payment_id == payment_id)?;

        if payment.status == status {
            return Some(LedgerUpdate::Unchanged(payment.clone()));
        }
        if payment.status.is_terminal() {
            warn!(
                "ignoring status {status} for settled payment {payment_id} ({})",
                payment.status
            );
            return Some(LedgerUpdate::Unchanged(payment.clone()));
        }

        payment.status = status;
        Some(LedgerUpdate::Applied(payment.clone()))
    }

    /// Attempts for a user, newest first
    pub fn payments(&self, user_id: UserId) -> Vec<Payment> {
        self.attempts
            .get(&user_id)
            .map(|attempts| attempts.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    /// Look up an attempt by gateway payment ID
    pub fn find(&self, payment_id: &str) -> Option<&Payment> {
        self.attempts
            .values()
            .flatten()
            .find(|payment| payment.payment_id == payment_id)
    }
}
