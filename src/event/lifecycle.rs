//! Event status rules.
//!
//! `Registration` and `Full` form an automatic pair derived from the active
//! registration count; `Completed` and `Cancelled` are manual and terminal.

use chrono::{DateTime, Utc};
use log::warn;

use super::models::{Event, EventStatus};
use crate::errors::{EngineError, EngineResult};

/// Whether the status admits no further mutation
pub fn is_terminal(status: EventStatus) -> bool {
    matches!(status, EventStatus::Completed | EventStatus::Cancelled)
}

/// Re-derive the `Registration`/`Full` pair from the active count
///
/// Reads `max_users` from the event on every call, so a capacity edit made
/// through the catalog takes effect on the next registration mutation.
/// Returns whether the status changed.
pub fn sync_with_capacity(event: &mut Event, active_count: usize) -> bool {
    let next = match event.status {
        EventStatus::Registration if active_count >= event.max_users => EventStatus::Full,
        EventStatus::Full if active_count < event.max_users => EventStatus::Registration,
        _ => return false,
    };
    event.status = next;
    true
}

/// Check an admin-requested status change
///
/// Only `Completed` and `Cancelled` can be set by hand. Completing an event
/// before its scheduled start is allowed but logged.
pub fn validate_manual_transition(
    event: &Event,
    target: EventStatus,
    now: DateTime<Utc>,
) -> EngineResult<()> {
    match target {
        EventStatus::Registration | EventStatus::Full => Err(EngineError::InvalidEventTransition {
            from: event.status,
            to: target,
        }),
        EventStatus::Completed | EventStatus::Cancelled => {
            if is_terminal(event.status) {
                return Err(EngineError::TerminalEventState(event.status));
            }
            if target == EventStatus::Completed && now < event.start_time {
                warn!(
                    "event {} marked completed before its start time {}",
                    event.id, event.start_time
                );
            }
            Ok(())
        }
    }
}
