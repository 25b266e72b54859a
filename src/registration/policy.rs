//! Per-event-type registration rules.
//!
//! Games and tournaments share one status enum but follow different closed
//! transition tables, slot accounting and payment rules. Each rule set is a
//! policy struct behind an `enum_dispatch` trait so the engine can pick the
//! right one from the event type without boxing.

use enum_dispatch::enum_dispatch;

use super::models::RegistrationStatus;
use crate::event::models::{Event, EventType};

/// Rules that vary by event type
#[enum_dispatch]
pub trait RegistrationPolicy {
    /// Status a fresh or revived attempt lands in
    fn initial_status(&self, event: &Event) -> RegistrationStatus;

    /// Whether a registration in this status holds one of the event's slots
    fn occupies_slot(&self, status: RegistrationStatus) -> bool;

    /// Whether the type's transition table allows the move
    fn can_transition(&self, from: RegistrationStatus, to: RegistrationStatus) -> bool;

    /// Target status when the user withdraws on their own
    fn leave_target(&self, current: RegistrationStatus) -> RegistrationStatus;

    /// Target status when the event itself is cancelled
    ///
    /// `None` for statuses that stay put, which keeps already-settled
    /// history untouched during teardown.
    fn cancel_target(&self, current: RegistrationStatus) -> Option<RegistrationStatus>;

    /// Whether the move requires a succeeded payment first
    fn payment_gated(
        &self,
        event: &Event,
        from: RegistrationStatus,
        to: RegistrationStatus,
    ) -> bool;
}

/// Rules for casual games
///
/// Joining holds a slot as `Invited` until the player confirms. Leaving is
/// always `Left`; an event cancellation marks slot holders `Cancelled`.
/// Either terminal status can be revived by a later join or an admin
/// confirmation, capacity permitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct GamePolicy;

impl RegistrationPolicy for GamePolicy {
    fn initial_status(&self, _event: &Event) -> RegistrationStatus {
        RegistrationStatus::Invited
    }

    fn occupies_slot(&self, status: RegistrationStatus) -> bool {
        matches!(
            status,
            RegistrationStatus::Invited | RegistrationStatus::Confirmed
        )
    }

    fn can_transition(&self, from: RegistrationStatus, to: RegistrationStatus) -> bool {
        use RegistrationStatus::*;
        matches!(
            (from, to),
            (Invited, Confirmed)
                | (Invited, Cancelled)
                | (Invited, Left)
                | (Confirmed, Cancelled)
                | (Confirmed, Left)
                | (Cancelled, Invited)
                | (Cancelled, Confirmed)
                | (Left, Invited)
                | (Left, Confirmed)
        )
    }

    fn leave_target(&self, _current: RegistrationStatus) -> RegistrationStatus {
        RegistrationStatus::Left
    }

    fn cancel_target(&self, current: RegistrationStatus) -> Option<RegistrationStatus> {
        self.occupies_slot(current)
            .then_some(RegistrationStatus::Cancelled)
    }

    fn payment_gated(
        &self,
        _event: &Event,
        _from: RegistrationStatus,
        _to: RegistrationStatus,
    ) -> bool {
        false
    }
}

/// Rules for tournaments
///
/// A paid tournament admits as `Pending` and only a succeeded payment
/// unlocks `Confirmed`. Free tournaments skip the gate and admit straight
/// to `Confirmed`. Withdrawal before payment is `CancelledBeforePayment`;
/// withdrawal after payment is `Refunded`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TournamentPolicy;

impl RegistrationPolicy for TournamentPolicy {
    fn initial_status(&self, event: &Event) -> RegistrationStatus {
        if event.is_free() {
            RegistrationStatus::Confirmed
        } else {
            RegistrationStatus::Pending
        }
    }

    fn occupies_slot(&self, status: RegistrationStatus) -> bool {
        matches!(
            status,
            RegistrationStatus::Pending | RegistrationStatus::Confirmed
        )
    }

    fn can_transition(&self, from: RegistrationStatus, to: RegistrationStatus) -> bool {
        use RegistrationStatus::*;
        matches!(
            (from, to),
            (Pending, Confirmed)
                | (Pending, CancelledBeforePayment)
                | (Confirmed, Refunded)
                | (CancelledBeforePayment, Pending)
                | (CancelledBeforePayment, Confirmed)
                | (Refunded, Pending)
                | (Refunded, Confirmed)
        )
    }

    fn leave_target(&self, current: RegistrationStatus) -> RegistrationStatus {
        match current {
            RegistrationStatus::Confirmed => RegistrationStatus::Refunded,
            _ => RegistrationStatus::CancelledBeforePayment,
        }
    }

    fn cancel_target(&self, current: RegistrationStatus) -> Option<RegistrationStatus> {
        match current {
            RegistrationStatus::Pending => Some(RegistrationStatus::CancelledBeforePayment),
            RegistrationStatus::Confirmed => Some(RegistrationStatus::Refunded),
            _ => None,
        }
    }

    fn payment_gated(
        &self,
        event: &Event,
        from: RegistrationStatus,
        to: RegistrationStatus,
    ) -> bool {
        from == RegistrationStatus::Pending
            && to == RegistrationStatus::Confirmed
            && !event.is_free()
    }
}

/// Policy for a concrete event type
#[enum_dispatch(RegistrationPolicy)]
#[derive(Debug, Clone, Copy)]
pub enum EventPolicy {
    Game(GamePolicy),
    Tournament(TournamentPolicy),
}

impl EventPolicy {
    /// Pick the policy matching the event type
    pub fn for_event_type(event_type: EventType) -> Self {
        match event_type {
            EventType::Game => EventPolicy::Game(GamePolicy),
            EventType::Tournament => EventPolicy::Tournament(TournamentPolicy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::models::EventType;
    use chrono::Utc;

    fn game_event() -> Event {
        Event::new("Evening game", EventType::Game, 0.0, 7.0, 0, 4, Utc::now())
    }

    fn paid_tournament() -> Event {
        Event::new(
            "City open",
            EventType::Tournament,
            0.0,
            7.0,
            2000_00,
            16,
            Utc::now(),
        )
    }

    fn free_tournament() -> Event {
        let mut event = paid_tournament();
        event.price = 0;
        event
    }

    #[test]
    fn test_game_admits_as_invited() {
        let policy = EventPolicy::for_event_type(EventType::Game);
        assert_eq!(
            policy.initial_status(&game_event()),
            RegistrationStatus::Invited
        );
    }

    #[test]
    fn test_paid_tournament_admits_as_pending() {
        let policy = EventPolicy::for_event_type(EventType::Tournament);
        assert_eq!(
            policy.initial_status(&paid_tournament()),
            RegistrationStatus::Pending
        );
    }

    #[test]
    fn test_free_tournament_admits_as_confirmed() {
        let policy = EventPolicy::for_event_type(EventType::Tournament);
        assert_eq!(
            policy.initial_status(&free_tournament()),
            RegistrationStatus::Confirmed
        );
    }

    #[test]
    fn test_game_slot_accounting() {
        let policy = GamePolicy;
        assert!(policy.occupies_slot(RegistrationStatus::Invited));
        assert!(policy.occupies_slot(RegistrationStatus::Confirmed));
        assert!(!policy.occupies_slot(RegistrationStatus::Cancelled));
        assert!(!policy.occupies_slot(RegistrationStatus::Left));
    }

    #[test]
    fn test_tournament_slot_accounting() {
        let policy = TournamentPolicy;
        assert!(policy.occupies_slot(RegistrationStatus::Pending));
        assert!(policy.occupies_slot(RegistrationStatus::Confirmed));
        assert!(!policy.occupies_slot(RegistrationStatus::CancelledBeforePayment));
        assert!(!policy.occupies_slot(RegistrationStatus::Refunded));
    }

    #[test]
    fn test_game_leave_is_always_left() {
        let policy = GamePolicy;
        assert_eq!(
            policy.leave_target(RegistrationStatus::Invited),
            RegistrationStatus::Left
        );
        assert_eq!(
            policy.leave_target(RegistrationStatus::Confirmed),
            RegistrationStatus::Left
        );
    }

    #[test]
    fn test_tournament_leave_depends_on_settlement() {
        let policy = TournamentPolicy;
        assert_eq!(
            policy.leave_target(RegistrationStatus::Pending),
            RegistrationStatus::CancelledBeforePayment
        );
        assert_eq!(
            policy.leave_target(RegistrationStatus::Confirmed),
            RegistrationStatus::Refunded
        );
    }

    #[test]
    fn test_cancel_targets_leave_settled_history_alone() {
        let game = GamePolicy;
        assert_eq!(
            game.cancel_target(RegistrationStatus::Invited),
            Some(RegistrationStatus::Cancelled)
        );
        assert_eq!(game.cancel_target(RegistrationStatus::Left), None);

        let tournament = TournamentPolicy;
        assert_eq!(
            tournament.cancel_target(RegistrationStatus::Confirmed),
            Some(RegistrationStatus::Refunded)
        );
        assert_eq!(tournament.cancel_target(RegistrationStatus::Refunded), None);
    }

    #[test]
    fn test_payment_gate_only_on_paid_pending_confirmation() {
        let policy = TournamentPolicy;
        let paid = paid_tournament();
        let free = free_tournament();

        assert!(policy.payment_gated(
            &paid,
            RegistrationStatus::Pending,
            RegistrationStatus::Confirmed
        ));
        assert!(!policy.payment_gated(
            &free,
            RegistrationStatus::Pending,
            RegistrationStatus::Confirmed
        ));
        // admin restore of a refunded entry is not re-gated
        assert!(!policy.payment_gated(
            &paid,
            RegistrationStatus::Refunded,
            RegistrationStatus::Confirmed
        ));
    }

    #[test]
    fn test_game_transition_table_is_closed() {
        use RegistrationStatus::*;
        let policy = GamePolicy;
        let allowed = [
            (Invited, Confirmed),
            (Invited, Cancelled),
            (Invited, Left),
            (Confirmed, Cancelled),
            (Confirmed, Left),
            (Cancelled, Invited),
            (Cancelled, Confirmed),
            (Left, Invited),
            (Left, Confirmed),
        ];

        for from in RegistrationStatus::ALL {
            for to in RegistrationStatus::ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    policy.can_transition(from, to),
                    expected,
                    "game table disagrees on {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_tournament_transition_table_is_closed() {
        use RegistrationStatus::*;
        let policy = TournamentPolicy;
        let allowed = [
            (Pending, Confirmed),
            (Pending, CancelledBeforePayment),
            (Confirmed, Refunded),
            (CancelledBeforePayment, Pending),
            (CancelledBeforePayment, Confirmed),
            (Refunded, Pending),
            (Refunded, Confirmed),
        ];

        for from in RegistrationStatus::ALL {
            for to in RegistrationStatus::ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    policy.can_transition(from, to),
                    expected,
                    "tournament table disagrees on {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_leave_targets_are_legal_transitions() {
        let game = GamePolicy;
        for from in [RegistrationStatus::Invited, RegistrationStatus::Confirmed] {
            assert!(game.can_transition(from, game.leave_target(from)));
        }

        let tournament = TournamentPolicy;
        for from in [RegistrationStatus::Pending, RegistrationStatus::Confirmed] {
            assert!(tournament.can_transition(from, tournament.leave_target(from)));
        }
    }
}
