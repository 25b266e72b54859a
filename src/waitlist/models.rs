//! Waitlist entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::models::EventId;
use crate::user::UserId;

/// One user waiting for a slot on a full event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// Waiting user
    pub user_id: UserId,
    /// Event being waited on
    pub event_id: EventId,
    /// When the user queued up; promotion order follows this
    pub joined_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Create an entry timestamped now
    pub fn new(user_id: UserId, event_id: EventId) -> Self {
        Self {
            user_id,
            event_id,
            joined_at: Utc::now(),
        }
    }
}
