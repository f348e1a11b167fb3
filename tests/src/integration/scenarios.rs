//! # Round Lifecycle Scenarios
//!
//! Full rounds from `open_ledger` to `claim`, asserting balances, records
//! and receipts at each step.

#[cfg(test)]
mod tests {
    use crate::harness::{TestHarness, DURATION, ENTRY};
    use lb_02_round_program::prelude::*;

    // =============================================================================
    // JOINING
    // =============================================================================

    #[test]
    fn test_joins_replace_leader() {
        let (h, round_id) = TestHarness::with_round();
        let user_a = h.player(2);
        let user_b = h.player(1);

        h.service.join(&user_a, round_id, ENTRY).unwrap();
        let round = h.round(round_id);
        assert_eq!(round.leader, Some(user_a));
        assert_eq!(round.join_count, 1);

        assert_eq!(
            h.service.join(&user_a, round_id, ENTRY),
            Err(RoundError::AlreadyLeader)
        );

        h.service.join(&user_b, round_id, ENTRY).unwrap();
        let round = h.round(round_id);
        assert_eq!(round.leader, Some(user_b));
        assert_eq!(round.join_count, 2);
        assert_eq!(h.pot(round_id).balance, 2 * ENTRY);
        assert_eq!(h.lamports(&user_a), ENTRY);
        assert_eq!(h.lamports(&user_b), 0);
    }

    #[test]
    fn test_join_restarts_countdown() {
        let (h, round_id) = TestHarness::with_round();
        let user = h.player(1);

        h.clock.advance(DURATION - 10);
        let receipt = h.service.join(&user, round_id, ENTRY).unwrap();
        let now = h.clock.advance(0);

        match &receipt.events[..] {
            [RoundEvent::Joined { deadline, .. }] => assert_eq!(*deadline, now + DURATION),
            other => panic!("unexpected events: {other:?}"),
        }

        h.clock.advance(DURATION - 1);
        assert_eq!(
            h.service.close_round(&user, round_id),
            Err(RoundError::RoundNotEnded)
        );
        h.clock.advance(1);
        assert!(h.service.close_round(&user, round_id).is_ok());
    }

    #[test]
    fn test_join_wrong_amount() {
        let (h, round_id) = TestHarness::with_round();
        let user = h.player(2);
        assert_eq!(
            h.service.join(&user, round_id, ENTRY - 1),
            Err(RoundError::IncorrectDepositAmount {
                expected: ENTRY,
                actual: ENTRY - 1
            })
        );
        assert_eq!(h.lamports(&user), 2 * ENTRY);
    }

    #[test]
    fn test_late_join_before_close_is_accepted() {
        let (h, round_id) = TestHarness::with_round();
        let user = h.player(1);
        h.clock.advance(DURATION * 2);
        assert!(h.service.join(&user, round_id, ENTRY).is_ok());
        assert_eq!(h.round(round_id).leader, Some(user));
    }

    // =============================================================================
    // CLOSING
    // =============================================================================

    #[test]
    fn test_close_only_after_countdown() {
        let (h, round_id) = TestHarness::with_round();
        let user_a = h.player(1);
        let user_b = h.player(1);
        h.service.join(&user_a, round_id, ENTRY).unwrap();
        h.service.join(&user_b, round_id, ENTRY).unwrap();

        let cranker = h.wallet(0);
        assert_eq!(
            h.service.close_round(&cranker, round_id),
            Err(RoundError::RoundNotEnded)
        );

        h.expire(round_id);
        let receipt = h.service.close_round(&cranker, round_id).unwrap();
        assert_eq!(
            receipt.events,
            vec![RoundEvent::RoundClosed {
                round_id,
                winner: Some(user_b),
                join_count: 2,
                closed_by: cranker,
            }]
        );

        let round = h.round(round_id);
        assert!(!round.is_active);
        assert!(round.has_closed);
        assert_eq!(h.global().active_round_id, None);
        assert_eq!(
            h.service.join(&user_a, round_id, ENTRY),
            Err(RoundError::RoundNotActive)
        );
    }

    #[test]
    fn test_close_twice() {
        let (h, round_id) = TestHarness::with_round();
        h.expire(round_id);
        h.service.close_round(&h.admin, round_id).unwrap();
        let after_first = h.store().snapshot();
        assert_eq!(
            h.service.close_round(&h.admin, round_id),
            Err(RoundError::RoundNotActive)
        );
        assert_eq!(h.store().snapshot(), after_first);
    }

    #[test]
    fn test_empty_round_closes_without_winner() {
        let (h, round_id) = TestHarness::with_round();
        h.expire(round_id);
        let receipt = h.service.close_round(&h.admin, round_id).unwrap();
        assert!(matches!(
            &receipt.events[..],
            [RoundEvent::RoundClosed {
                winner: None,
                join_count: 0,
                ..
            }]
        ));

        let anyone = h.wallet(0);
        assert_eq!(
            h.service.claim(&anyone, round_id),
            Err(RoundError::NotLeader)
        );
        assert_eq!(h.pot(round_id).balance, 0);
    }

    // =============================================================================
    // CLAIMING
    // =============================================================================

    #[test]
    fn test_leader_claims_whole_pot() {
        let (h, round_id) = TestHarness::with_round();
        let user_a = h.player(1);
        let user_b = h.player(1);
        h.service.join(&user_a, round_id, ENTRY).unwrap();
        h.service.join(&user_b, round_id, ENTRY).unwrap();

        assert_eq!(
            h.service.claim(&user_b, round_id),
            Err(RoundError::RoundNotEnded)
        );

        h.expire(round_id);
        h.service.close_round(&user_a, round_id).unwrap();

        assert_eq!(
            h.service.claim(&user_a, round_id),
            Err(RoundError::NotLeader)
        );

        let before = h.lamports(&user_b);
        let receipt = h.service.claim(&user_b, round_id).unwrap();
        assert_eq!(
            receipt.events,
            vec![RoundEvent::PotClaimed {
                round_id,
                winner: user_b,
                amount: 2 * ENTRY
            }]
        );
        assert_eq!(h.lamports(&user_b), before + 2 * ENTRY);
        assert_eq!(h.pot(round_id).balance, 0);

        assert_eq!(
            h.service.claim(&user_b, round_id),
            Err(RoundError::NothingToClaim)
        );
    }

    #[test]
    fn test_pot_keeps_rent_reserve_after_claim() {
        let (h, round_id) = TestHarness::with_round();
        let pot = pot_address(&h.service.program_id(), round_id).unwrap();
        let reserve = h.lamports(&pot);
        let user = h.player(1);

        h.service.join(&user, round_id, ENTRY).unwrap();
        assert_eq!(h.lamports(&pot), reserve + ENTRY);

        h.expire(round_id);
        h.service.close_round(&user, round_id).unwrap();
        h.service.claim(&user, round_id).unwrap();
        assert_eq!(h.lamports(&pot), reserve);
    }

    // =============================================================================
    // ADMINISTRATION
    // =============================================================================

    #[test]
    fn test_start_round_authority_and_exclusivity() {
        let h = TestHarness::opened();
        let intruder = h.wallet(ENTRY);
        assert_eq!(
            h.service.start_round(&intruder, ENTRY, DURATION),
            Err(RoundError::Unauthorized)
        );

        let round_id = h.start_round();
        assert_eq!(
            h.service.start_round(&h.admin, ENTRY, DURATION),
            Err(RoundError::RoundAlreadyActive)
        );
        assert_eq!(h.global().active_round_id, Some(round_id));
    }

    #[test]
    fn test_start_round_rejects_bad_params() {
        let h = TestHarness::opened();
        assert_eq!(
            h.service.start_round(&h.admin, 0, DURATION),
            Err(RoundError::InvalidEntryAmount)
        );
        assert_eq!(
            h.service.start_round(&h.admin, ENTRY, 0),
            Err(RoundError::InvalidRoundDuration(0))
        );
        assert_eq!(
            h.service.start_round(&h.admin, ENTRY, -5),
            Err(RoundError::InvalidRoundDuration(-5))
        );
        assert_eq!(h.global().next_round_id, 0);
    }

    #[test]
    fn test_consecutive_rounds() {
        let h = TestHarness::opened();
        let user = h.player(2);

        for expected_id in 0..2 {
            let round_id = h.start_round();
            assert_eq!(round_id, expected_id);
            h.service.join(&user, round_id, ENTRY).unwrap();
            h.expire(round_id);
            h.service.close_round(&user, round_id).unwrap();
            h.service.claim(&user, round_id).unwrap();
        }

        let global = h.global();
        assert_eq!(global.next_round_id, 2);
        assert_eq!(global.active_round_id, None);
        assert_eq!(h.lamports(&user), 2 * ENTRY);
        assert!(h.round(0).has_closed);
        assert!(h.round(1).has_closed);
    }

    #[test]
    fn test_start_round_requires_ledger() {
        let h = TestHarness::new();
        assert!(matches!(
            h.service.start_round(&h.admin, ENTRY, DURATION),
            Err(RoundError::Runtime(lb_01_ledger_runtime::RuntimeError::AccountNotFound { .. }))
        ));
    }

    // =============================================================================
    // STATUS
    // =============================================================================

    #[test]
    fn test_round_status_phases() {
        let (h, round_id) = TestHarness::with_round();
        let status = h.service.round_status(round_id).unwrap().unwrap();
        assert_eq!(status.phase, RoundPhase::AwaitingFirstJoin);
        assert_eq!(status.seconds_remaining, DURATION);

        let user = h.player(1);
        h.service.join(&user, round_id, ENTRY).unwrap();
        let status = h.service.round_status(round_id).unwrap().unwrap();
        assert_eq!(status.phase, RoundPhase::Open);
        assert_eq!(status.pot_balance, ENTRY);

        h.expire(round_id);
        let status = h.service.round_status(round_id).unwrap().unwrap();
        assert_eq!(status.phase, RoundPhase::Expired);
        assert_eq!(status.seconds_remaining, 0);

        h.service.close_round(&user, round_id).unwrap();
        assert_eq!(
            h.service.round_status(round_id).unwrap().unwrap().phase,
            RoundPhase::Closed
        );

        h.service.claim(&user, round_id).unwrap();
        assert_eq!(
            h.service.round_status(round_id).unwrap().unwrap().phase,
            RoundPhase::Claimed
        );
        assert!(h.service.round_status(round_id + 1).unwrap().is_none());
    }

    // =============================================================================
    // TELEMETRY
    // =============================================================================

    #[test]
    fn test_operations_reach_prometheus() {
        let config = lb_telemetry::TelemetryConfig {
            console_output: false,
            ..lb_telemetry::TelemetryConfig::from_env()
        };
        let _guard = lb_telemetry::init_telemetry(config).unwrap();

        let (h, round_id) = TestHarness::with_round();
        let user = h.player(1);
        let timed_before = lb_telemetry::metrics::OPERATION_DURATION.get_sample_count();
        h.service.join(&user, round_id, ENTRY).unwrap();
        let _ = h.service.join(&user, round_id, ENTRY);

        // Rejected operations are timed too
        let timed = lb_telemetry::metrics::OPERATION_DURATION.get_sample_count() - timed_before;
        assert!(timed >= 2);

        let text = lb_telemetry::encode_metrics().unwrap();
        assert!(text.contains("lb_round_operations_total"));
        assert!(text.contains("outcome=\"rejected\""));
        assert!(text.contains("lb_round_lamports_deposited_total"));
        assert!(text.contains("lb_runtime_transaction_duration_seconds"));
    }

    // =============================================================================
    // RENT-FREE LEDGER
    // =============================================================================

    #[test]
    fn test_rent_free_pot_holds_only_deposits() {
        let h = TestHarness::rent_free();
        h.service.open_ledger(&h.admin).unwrap();
        let round_id = h.start_round();
        assert_eq!(h.lamports(&h.admin), crate::harness::ADMIN_FUNDS);

        let winner = h.player(1);
        h.service.join(&winner, round_id, ENTRY).unwrap();
        let pot_key = pot_address(&h.service.program_id(), round_id).unwrap();
        assert_eq!(h.lamports(&pot_key), ENTRY);

        h.expire(round_id);
        h.service.close_round(&winner, round_id).unwrap();
        h.service.claim(&winner, round_id).unwrap();
        assert_eq!(h.lamports(&pot_key), 0);
        assert_eq!(h.lamports(&winner), ENTRY);
    }
}
