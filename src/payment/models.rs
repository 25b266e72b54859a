//! Payment attempt models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::event::models::EventId;
use crate::user::UserId;

/// Payment status as reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Charge created, checkout not finished
    Pending,
    /// Authorized and waiting for capture
    WaitingForCapture,
    /// Money collected
    Succeeded,
    /// Charge cancelled or expired
    Canceled,
}

impl PaymentStatus {
    /// Whether the gateway will never move this payment again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Canceled)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Pending => "pending",
            Self::WaitingForCapture => "waiting_for_capture",
            Self::Succeeded => "succeeded",
            Self::Canceled => "canceled",
        };
        write!(f, "{repr}")
    }
}

/// A charge freshly created at the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    /// Gateway payment ID
    pub payment_id: String,
    /// Checkout URL for the payer
    pub payment_link: String,
}

/// One payment attempt attached to a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Internal payment ID
    pub id: Uuid,
    /// Gateway payment ID, the key webhooks arrive with
    pub payment_id: String,
    /// Paying user
    pub user_id: UserId,
    /// Event being paid for
    pub event_id: EventId,
    /// Amount in minor currency units
    pub amount: i64,
    /// Current status
    pub status: PaymentStatus,
    /// Attempt creation time
    pub created_at: DateTime<Utc>,
    /// Checkout URL for the payer
    pub payment_link: String,
}

impl Payment {
    /// Build a pending attempt from a gateway charge
    pub fn from_charge(charge: Charge, user_id: UserId, event_id: EventId, amount: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_id: charge.payment_id,
            user_id,
            event_id,
            amount,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            payment_link: charge.payment_link,
        }
    }

    /// Whether this attempt blocks starting another one
    ///
    /// Everything short of a cancellation does: a pending or authorized
    /// charge may still settle, and a succeeded one already has.
    pub fn is_active(&self) -> bool {
        self.status != PaymentStatus::Canceled
    }
}
