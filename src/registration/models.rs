//! Registration records and their status domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::models::EventId;
use crate::user::UserId;

/// Registration status
///
/// Games and tournaments each use their own subset; the per-type transition
/// tables live in [`crate::registration::policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    /// Tournament entry awaiting payment
    Pending,
    /// Game slot held, acceptance outstanding
    Invited,
    /// Slot taken and settled
    Confirmed,
    /// Tournament entry withdrawn before any payment succeeded
    CancelledBeforePayment,
    /// Paid tournament entry withdrawn, money returned
    Refunded,
    /// Game registration cancelled, usually because the event was
    Cancelled,
    /// Player left a game on their own
    Left,
}

impl RegistrationStatus {
    /// All statuses, for table-driven checks
    pub const ALL: [RegistrationStatus; 7] = [
        RegistrationStatus::Pending,
        RegistrationStatus::Invited,
        RegistrationStatus::Confirmed,
        RegistrationStatus::CancelledBeforePayment,
        RegistrationStatus::Refunded,
        RegistrationStatus::Cancelled,
        RegistrationStatus::Left,
    ];
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Pending => "pending",
            Self::Invited => "invited",
            Self::Confirmed => "confirmed",
            Self::CancelledBeforePayment => "cancelled_before_payment",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
            Self::Left => "left",
        };
        write!(f, "{repr}")
    }
}

/// A user's registration on an event
///
/// Keyed by `(user_id, event_id)`, unique per pair. Registrations are never
/// deleted; terminal statuses keep the history and can be revived by a
/// later attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// User ID
    pub user_id: UserId,
    /// Event ID
    pub event_id: EventId,
    /// Current status
    pub status: RegistrationStatus,
    /// First created
    pub created_at: DateTime<Utc>,
    /// Last status change
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Create a registration in the given initial status
    pub fn new(user_id: UserId, event_id: EventId, status: RegistrationStatus) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            event_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to a new status, refreshing the update timestamp
    pub fn set_status(&mut self, status: RegistrationStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_display() {
        assert_eq!(RegistrationStatus::Pending.to_string(), "pending");
        assert_eq!(
            RegistrationStatus::CancelledBeforePayment.to_string(),
            "cancelled_before_payment"
        );
        assert_eq!(RegistrationStatus::Left.to_string(), "left");
    }

    #[test]
    fn test_status_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&RegistrationStatus::CancelledBeforePayment).unwrap();
        assert_eq!(json, "\"CANCELLED_BEFORE_PAYMENT\"");
        let back: RegistrationStatus = serde_json::from_str("\"CONFIRMED\"").unwrap();
        assert_eq!(back, RegistrationStatus::Confirmed);
    }

    #[test]
    fn test_set_status_refreshes_updated_at() {
        let mut reg = Registration::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            RegistrationStatus::Pending,
        );
        let created = reg.created_at;
        reg.set_status(RegistrationStatus::Confirmed);
        assert_eq!(reg.status, RegistrationStatus::Confirmed);
        assert!(reg.updated_at >= created);
        assert_eq!(reg.created_at, created);
    }

    #[test]
    fn test_all_lists_every_status() {
        assert_eq!(RegistrationStatus::ALL.len(), 7);
    }
}
