//! # Account Substitution
//!
//! Raw transactions that swap in accounts other than the canonical ones,
//! or claim signatures they do not carry. Every one must be rejected
//! before it can move funds.

#[cfg(test)]
mod tests {
    use crate::harness::{TestHarness, ENTRY};
    use lb_01_ledger_runtime::{Instruction, RuntimeError, Transaction};
    use lb_02_round_program::prelude::*;

    fn submit(h: &TestHarness, signer: Address, ix: Instruction) -> Result<Receipt, RoundError> {
        h.service
            .process_transaction(&Transaction::new(signer, ix))
    }

    fn address_mismatch(expected: Address, actual: Address) -> RoundError {
        RoundError::Runtime(RuntimeError::AddressMismatch { expected, actual })
    }

    /// Round 0 closed with `winner` as leader, round 1 open.
    fn two_rounds() -> (TestHarness, Address) {
        let (h, round_id) = TestHarness::with_round();
        let winner = h.player(1);
        h.service.join(&winner, round_id, ENTRY).unwrap();
        h.expire(round_id);
        h.service.close_round(&winner, round_id).unwrap();
        assert_eq!(h.start_round(), 1);
        (h, winner)
    }

    #[test]
    fn test_join_with_pot_of_other_round() {
        let (h, _) = two_rounds();
        let program = h.service.program_id();
        let player = h.player(1);

        let mut ix = join_instruction(&program, &player, 1, ENTRY).unwrap();
        let pot_0 = pot_address(&program, 0).unwrap();
        ix.accounts[1].address = pot_0;

        assert_eq!(
            submit(&h, player, ix),
            Err(address_mismatch(pot_address(&program, 1).unwrap(), pot_0))
        );
        assert_eq!(h.lamports(&player), ENTRY);
    }

    #[test]
    fn test_claim_with_pot_of_other_round() {
        let (h, winner) = two_rounds();
        let program = h.service.program_id();
        let depositor = h.player(1);
        h.service.join(&depositor, 1, ENTRY).unwrap();

        let mut ix = claim_instruction(&program, &winner, 0).unwrap();
        let pot_1 = pot_address(&program, 1).unwrap();
        ix.accounts[1].address = pot_1;

        assert_eq!(
            submit(&h, winner, ix),
            Err(address_mismatch(pot_address(&program, 0).unwrap(), pot_1))
        );
        assert_eq!(h.pot(1).balance, ENTRY);
    }

    #[test]
    fn test_close_with_forged_global_ledger() {
        let (h, round_id) = TestHarness::with_round();
        let program = h.service.program_id();
        h.expire(round_id);

        let forged = h.wallet(0);
        let mut ix = close_round_instruction(&program, round_id).unwrap();
        ix.accounts[1].address = forged;

        assert_eq!(
            submit(&h, h.admin, ix),
            Err(address_mismatch(global_ledger_address(&program).unwrap(), forged))
        );
        assert!(h.round(round_id).is_active);
    }

    #[test]
    fn test_start_round_at_non_canonical_address() {
        let h = TestHarness::opened();
        let program = h.service.program_id();
        let mut ix =
            start_round_instruction(&program, &h.admin, 0, RoundParams::new(ENTRY, 60)).unwrap();
        let wrong_round = round_address(&program, 7).unwrap();
        ix.accounts[1].address = wrong_round;

        assert_eq!(
            submit(&h, h.admin, ix),
            Err(address_mismatch(round_address(&program, 0).unwrap(), wrong_round))
        );
        assert_eq!(h.global().next_round_id, 0);
    }

    #[test]
    fn test_pot_passed_as_round() {
        let (h, round_id) = TestHarness::with_round();
        let program = h.service.program_id();
        let player = h.player(1);

        let mut ix = join_instruction(&program, &player, round_id, ENTRY).unwrap();
        ix.accounts[0].address = ix.accounts[1].address;

        assert!(matches!(
            submit(&h, player, ix),
            Err(RoundError::AccountDiscriminatorMismatch { expected: "Round" })
        ));
    }

    #[test]
    fn test_wallet_passed_as_round() {
        let (h, round_id) = TestHarness::with_round();
        let program = h.service.program_id();
        let player = h.player(1);
        let decoy = h.wallet(ENTRY);

        let mut ix = join_instruction(&program, &player, round_id, ENTRY).unwrap();
        ix.accounts[0].address = decoy;

        assert!(matches!(
            submit(&h, player, ix),
            Err(RoundError::Runtime(RuntimeError::IllegalOwner { .. }))
        ));
    }

    #[test]
    fn test_join_signed_by_someone_else() {
        let (h, round_id) = TestHarness::with_round();
        let program = h.service.program_id();
        let victim = h.player(1);
        let attacker = h.player(1);

        let ix = join_instruction(&program, &victim, round_id, ENTRY).unwrap();
        assert_eq!(
            submit(&h, attacker, ix),
            Err(RoundError::Runtime(RuntimeError::MissingRequiredSignature {
                address: victim
            }))
        );
        assert_eq!(h.lamports(&victim), ENTRY);
    }

    #[test]
    fn test_claim_for_winner_by_other_signer() {
        let (h, winner) = two_rounds();
        let program = h.service.program_id();
        let thief = h.wallet(0);

        let mut ix = claim_instruction(&program, &thief, 0).unwrap();
        ix.accounts[2].address = winner;
        ix.accounts[2].is_signer = false;

        assert!(submit(&h, thief, ix).is_err());
        assert_eq!(h.pot(0).balance, ENTRY);
        assert_eq!(h.lamports(&thief), 0);
    }

    #[test]
    fn test_other_program_id_rejected() {
        let (h, round_id) = TestHarness::with_round();
        let player = h.player(1);
        let mut ix = join_instruction(&h.service.program_id(), &player, round_id, ENTRY).unwrap();
        ix.program_id = Address::new_unique();
        assert_eq!(
            submit(&h, player, ix),
            Err(RoundError::IncorrectProgramId)
        );
    }

    #[test]
    fn test_prefunded_pot_address_is_adopted() {
        let h = TestHarness::opened();
        let program = h.service.program_id();
        let pot = pot_address(&program, 0).unwrap();
        h.service.ledger().fund(&pot, 5).unwrap();

        let round_id = h.start_round();
        let reserve = h.service.ledger().rent().minimum_balance(Pot::SPACE);
        assert_eq!(h.lamports(&pot), reserve);
        assert_eq!(h.pot(round_id).balance, 0);
        assert_eq!(h.service.pot(round_id).unwrap().unwrap().round_id, round_id);
    }
}
