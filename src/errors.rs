//! Error taxonomy shared by every engine operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::event::models::{EventId, EventStatus};
use crate::registration::models::RegistrationStatus;
use crate::user::UserId;

/// The thing an operation failed to find
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Resource {
    /// User profile
    User(UserId),
    /// Event
    Event(EventId),
    /// Registration for a user on an event
    Registration(UserId),
    /// Payment by gateway ID
    Payment(String),
}

impl Resource {
    /// Resource kind without identifying detail
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Event(_) => "event",
            Self::Registration(_) => "registration",
            Self::Payment(_) => "payment",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Event(id) => write!(f, "event {id}"),
            Self::Registration(user_id) => write!(f, "registration for user {user_id}"),
            Self::Payment(payment_id) => write!(f, "payment {payment_id}"),
        }
    }
}

/// Errors that can occur during registration and lifecycle operations
#[derive(Clone, Debug, Deserialize, Error, PartialEq, Serialize)]
pub enum EngineError {
    #[error("rank {rank} is outside the allowed window {rank_min} to {rank_max}")]
    RankOutOfRange {
        rank: f64,
        rank_min: f64,
        rank_max: f64,
    },
    #[error("user already registered")]
    DuplicateRegistration,
    #[error("user already on the waitlist")]
    DuplicateWaitlist,
    #[error("registration can't move from {from} to {to}")]
    InvalidTransition {
        from: RegistrationStatus,
        to: RegistrationStatus,
    },
    #[error("event status can't move from {from} to {to}")]
    InvalidEventTransition { from: EventStatus, to: EventStatus },
    #[error("payment required before confirmation")]
    PaymentRequired,
    #[error("event is full")]
    EventFull,
    #[error("{0} not found")]
    NotFound(Resource),
    #[error("event is {0}")]
    TerminalEventState(EventStatus),
    #[error("an active payment attempt already exists")]
    DuplicatePayment,
    #[error("invalid event config: {0}")]
    InvalidEvent(String),
    #[error("invalid leaderboard: {0}")]
    InvalidLeaderboard(String),
    #[error("payment gateway error: {0}")]
    Gateway(String),
}

impl EngineError {
    /// Get a client-safe error message that doesn't leak internal detail
    ///
    /// Gateway failures are collapsed to a generic message and resource IDs
    /// are redacted from not-found errors.
    pub fn client_message(&self) -> String {
        match self {
            EngineError::Gateway(_) => "payment service unavailable".to_string(),
            EngineError::NotFound(resource) => format!("{} not found", resource.kind()),
            _ => self.to_string(),
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
