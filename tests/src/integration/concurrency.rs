//! # Concurrency
//!
//! Transactions touching the same round serialize on its account locks.
//! These tests race operations from many threads and check that the
//! committed history matches some serial order.

#[cfg(test)]
mod tests {
    use crate::harness::{TestHarness, ENTRY};
    use lb_02_round_program::prelude::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    const THREADS: usize = 16;

    fn join_counts(receipts: &[Receipt]) -> Vec<u64> {
        let mut counts: Vec<u64> = receipts
            .iter()
            .flat_map(|receipt| receipt.events.iter())
            .filter_map(|event| match event {
                RoundEvent::Joined { join_count, .. } => Some(*join_count),
                _ => None,
            })
            .collect();
        counts.sort_unstable();
        counts
    }

    #[test]
    fn test_parallel_joins_serialize() {
        let (h, round_id) = TestHarness::with_round();
        let h = Arc::new(h);
        let players: Vec<Address> = (0..THREADS).map(|_| h.player(1)).collect();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = players
            .iter()
            .copied()
            .map(|player| {
                let h = Arc::clone(&h);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    h.service.join(&player, round_id, ENTRY)
                })
            })
            .collect();

        let receipts: Vec<Receipt> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect();

        let expected: Vec<u64> = (1..=THREADS as u64).collect();
        assert_eq!(join_counts(&receipts), expected);

        let round = h.round(round_id);
        assert_eq!(round.join_count, THREADS as u64);
        assert_eq!(h.pot(round_id).balance, ENTRY * THREADS as u64);

        let last_leader = receipts
            .iter()
            .flat_map(|receipt| receipt.events.iter())
            .find_map(|event| match event {
                RoundEvent::Joined {
                    join_count, leader, ..
                } if *join_count == THREADS as u64 => Some(*leader),
                _ => None,
            });
        assert_eq!(round.leader, last_leader);
    }

    #[test]
    fn test_parallel_closes_commit_once() {
        let (h, round_id) = TestHarness::with_round();
        let h = Arc::new(h);
        let crankers: Vec<Address> = (0..THREADS).map(|_| h.wallet(0)).collect();
        h.expire(round_id);
        let barrier = Arc::new(Barrier::new(THREADS));

        let results: Vec<_> = crankers
            .into_iter()
            .map(|cranker| {
                let h = Arc::clone(&h);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    h.service.close_round(&cranker, round_id)
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == RoundError::RoundNotActive));
        assert_eq!(h.global().active_round_id, None);
    }

    #[test]
    fn test_join_races_close() {
        for _ in 0..20 {
            let (h, round_id) = TestHarness::with_round();
            let h = Arc::new(h);
            let first = h.player(1);
            h.service.join(&first, round_id, ENTRY).unwrap();
            h.expire(round_id);

            let late = h.player(1);
            let barrier = Arc::new(Barrier::new(2));

            let joiner = {
                let h = Arc::clone(&h);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    h.service.join(&late, round_id, ENTRY)
                })
            };
            let closer = {
                let h = Arc::clone(&h);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    h.service.close_round(&first, round_id)
                })
            };

            let joined = joiner.join().unwrap();
            let closed = closer.join().unwrap();
            let round = h.round(round_id);

            match (joined, closed) {
                (Ok(_), Err(RoundError::RoundNotEnded)) => {
                    assert_eq!(round.leader, Some(late));
                    assert!(round.is_active);
                }
                (Err(RoundError::RoundNotActive), Ok(_)) => {
                    assert_eq!(round.leader, Some(first));
                    assert!(round.has_closed);
                    assert_eq!(h.lamports(&late), ENTRY);
                }
                other => panic!("not a serial outcome: {other:?}"),
            }
        }
    }

    #[test]
    fn test_parallel_claims_pay_once() {
        let (h, round_id) = TestHarness::with_round();
        let winner = h.player(1);
        h.service.join(&winner, round_id, ENTRY).unwrap();
        h.expire(round_id);
        h.service.close_round(&winner, round_id).unwrap();
        let h = Arc::new(h);
        let barrier = Arc::new(Barrier::new(THREADS));

        let results: Vec<_> = (0..THREADS)
            .map(|_| {
                let h = Arc::clone(&h);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    h.service.claim(&winner, round_id)
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == RoundError::NothingToClaim));
        assert_eq!(h.lamports(&winner), ENTRY);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_blocking_tasks_join_concurrently() {
        let (h, round_id) = TestHarness::with_round();
        let h = Arc::new(h);
        let total = h.store().total_lamports();
        let players: Vec<Address> = (0..THREADS).map(|_| h.player(2)).collect();
        let total_after_funding = h.store().total_lamports();
        assert!(total_after_funding > total);

        let mut tasks = Vec::new();
        for player in players.iter().copied().cycle().take(THREADS * 2) {
            let h = Arc::clone(&h);
            tasks.push(tokio::task::spawn_blocking(move || {
                h.service.join(&player, round_id, ENTRY)
            }));
        }

        let mut committed = 0u64;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => committed += 1,
                Err(RoundError::AlreadyLeader) => {}
                Err(other) => panic!("unexpected rejection: {other}"),
            }
        }

        assert!(committed >= THREADS as u64);
        assert_eq!(h.round(round_id).join_count, committed);
        assert_eq!(h.pot(round_id).balance, committed * ENTRY);
        assert_eq!(h.store().total_lamports(), total_after_funding);
    }
}
