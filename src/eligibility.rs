//! Rating eligibility for event registration.

use crate::errors::{EngineError, EngineResult};
use crate::event::models::Event;
use crate::user::User;

/// Whether a rating falls inside the event's window
///
/// Both bounds are inclusive: a 2.0 player may join a 2.0-3.0 event, and so
/// may a 3.0 player.
pub fn is_eligible(rank: f64, event: &Event) -> bool {
    event.rank_min <= rank && rank <= event.rank_max
}

/// Check a profile against the event's rating window
pub fn check(user: &User, event: &Event) -> EngineResult<()> {
    if is_eligible(user.rank, event) {
        Ok(())
    } else {
        Err(EngineError::RankOutOfRange {
            rank: user.rank,
            rank_min: event.rank_min,
            rank_max: event.rank_max,
        })
    }
}
