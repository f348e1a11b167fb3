//! # Round Program Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | join (uncontended) | < 50µs |
//! | full round lifecycle | < 500µs |
//! | instruction decode | < 1µs |

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use lb_02_round_program::prelude::*;
use lb_tests::harness::{TestHarness, ENTRY};

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("lb-02-join");

    for joins in [1u64, 10, 100] {
        group.throughput(Throughput::Elements(joins));
        group.bench_with_input(BenchmarkId::new("sequential_joins", joins), &joins, |b, &joins| {
            b.iter_batched(
                || {
                    let (h, round_id) = TestHarness::with_round();
                    let players = [h.player(joins), h.player(joins)];
                    (h, round_id, players)
                },
                |(h, round_id, players)| {
                    for i in 0..joins {
                        let player = &players[(i % 2) as usize];
                        black_box(h.service.join(player, round_id, ENTRY).is_ok());
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("lb-02-lifecycle");

    group.bench_function("start_join_close_claim", |b| {
        b.iter_batched(
            || {
                let h = TestHarness::opened();
                let player = h.player(1);
                (h, player)
            },
            |(h, player)| {
                let round_id = h.start_round();
                h.service.join(&player, round_id, ENTRY).ok();
                h.expire(round_id);
                h.service.close_round(&player, round_id).ok();
                black_box(h.service.claim(&player, round_id).is_ok());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("lb-02-instruction");
    let data = RoundInstruction::Join { amount: ENTRY }.pack().unwrap_or_default();

    group.bench_function("unpack_join", |b| {
        b.iter(|| black_box(RoundInstruction::unpack(black_box(&data)).is_ok()))
    });
    group.finish();
}

criterion_group!(benches, bench_join, bench_lifecycle, bench_decode);
criterion_main!(benches);
