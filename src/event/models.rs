//! Event data models for games, tournaments and their results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::user::UserId;

/// Event ID type
pub type EventId = Uuid;

/// Event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Casual game on a booked court
    Game,
    /// Competitive tournament with paid entry
    Tournament,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Game => "game",
            Self::Tournament => "tournament",
        };
        write!(f, "{repr}")
    }
}

/// Event status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Accepting registrations
    Registration,
    /// All slots taken, new joins go to the waitlist
    Full,
    /// Event finished, results may be recorded
    Completed,
    /// Event called off
    Cancelled,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Registration => "registration",
            Self::Full => "full",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{repr}")
    }
}

/// One row of a final standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Finishing place, 1-indexed and contiguous
    pub place: u32,
    /// User ID
    pub user_id: UserId,
}

/// Recorded outcome of a completed event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResult {
    /// Final standings, ordered by place
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Type-specific event payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    /// Discipline label, e.g. "mexicano" or "americano"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Final standings once the event is completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<EventResult>,
}

/// A capacity-limited event on a booked court
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event ID
    pub id: EventId,
    /// Event name
    pub name: String,
    /// Event type
    pub event_type: EventType,
    /// Current status
    pub status: EventStatus,
    /// Lowest rating allowed to register (inclusive)
    pub rank_min: f64,
    /// Highest rating allowed to register (inclusive)
    pub rank_max: f64,
    /// Entry price in minor currency units; 0 means free
    pub price: i64,
    /// Slot capacity
    pub max_users: usize,
    /// Scheduled start
    pub start_time: DateTime<Utc>,
    /// Scheduled end, if known
    pub end_time: Option<DateTime<Utc>>,
    /// Type-specific payload
    pub data: EventData,
}

impl Event {
    /// Create an event accepting registrations
    pub fn new(
        name: impl Into<String>,
        event_type: EventType,
        rank_min: f64,
        rank_max: f64,
        price: i64,
        max_users: usize,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            event_type,
            status: EventStatus::Registration,
            rank_min,
            rank_max,
            price,
            max_users,
            start_time,
            end_time: None,
            data: EventData::default(),
        }
    }

    /// Validate the event configuration
    pub fn validate(&self) -> EngineResult<()> {
        if self.rank_min > self.rank_max {
            return Err(EngineError::InvalidEvent(
                "Minimum rank must not exceed maximum rank".to_string(),
            ));
        }

        if self.max_users < 2 {
            return Err(EngineError::InvalidEvent(
                "Capacity must be at least 2 players".to_string(),
            ));
        }

        if self.price < 0 {
            return Err(EngineError::InvalidEvent(
                "Price must not be negative".to_string(),
            ));
        }

        if let Some(end_time) = self.end_time
            && end_time < self.start_time
        {
            return Err(EngineError::InvalidEvent(
                "End time must not precede start time".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether registration carries an entry fee
    pub fn is_free(&self) -> bool {
        self.price == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_event() -> Event {
        Event::new("Friday night game", EventType::Game, 1.0, 3.0, 0, 4, Utc::now())
    }

    #[test]
    fn test_new_event_starts_in_registration() {
        let event = base_event();
        assert_eq!(event.status, EventStatus::Registration);
        assert!(event.data.result.is_none());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_rank_window() {
        let mut event = base_event();
        event.rank_min = 4.0;
        event.rank_max = 2.0;
        assert!(matches!(event.validate(), Err(EngineError::InvalidEvent(_))));
    }

    #[test]
    fn test_validate_rejects_tiny_capacity() {
        let mut event = base_event();
        event.max_users = 1;
        assert!(matches!(event.validate(), Err(EngineError::InvalidEvent(_))));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut event = base_event();
        event.price = -100;
        assert!(matches!(event.validate(), Err(EngineError::InvalidEvent(_))));
    }

    #[test]
    fn test_validate_rejects_end_before_start() {
        let mut event = base_event();
        event.end_time = Some(event.start_time - chrono::Duration::hours(2));
        assert!(matches!(event.validate(), Err(EngineError::InvalidEvent(_))));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(EventStatus::Registration.to_string(), "registration");
        assert_eq!(EventStatus::Full.to_string(), "full");
        assert_eq!(EventStatus::Completed.to_string(), "completed");
        assert_eq!(EventStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_event_data_serde_skips_empty_fields() {
        let json = serde_json::to_string(&EventData::default()).unwrap();
        assert_eq!(json, "{}");

        let data = EventData {
            kind: Some("mexicano".to_string()),
            result: None,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, "{\"kind\":\"mexicano\"}");
    }

    #[test]
    fn test_is_free() {
        let mut event = base_event();
        assert!(event.is_free());
        event.price = 1500_00;
        assert!(!event.is_free());
    }
}
