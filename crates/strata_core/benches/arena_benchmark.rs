//! # Arena Benchmarks
//!
//! Allocation churn on both arena variants plus defragmentation cost.
//!
//! Run with: `cargo bench --package strata_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use strata_core::{CompactingArena, FixedArena};

/// Backing store size used by every benchmark.
const CAPACITY: usize = 1024 * 1024;

/// Benchmark: fill a fixed arena, then free every other block and refill.
fn bench_fixed_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_churn");

    for blocks in [64, 512, 2048] {
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &blocks, |b, &blocks| {
            b.iter(|| {
                let mut arena = FixedArena::new(CAPACITY);
                let addrs: Vec<_> = (0..blocks)
                    .filter_map(|i| arena.allocate(1, 16 + i % 48).ok())
                    .collect();
                for addr in addrs.iter().step_by(2) {
                    let _ = arena.free(*addr);
                }
                for _ in 0..blocks / 2 {
                    black_box(arena.allocate(1, 8).ok());
                }
                arena.used_bytes()
            });
        });
    }

    group.finish();
}

/// Benchmark: same churn pattern on the compacting arena.
fn bench_compacting_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("compacting_churn");

    for blocks in [64, 512, 2048] {
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &blocks, |b, &blocks| {
            b.iter(|| {
                let mut arena = CompactingArena::new(CAPACITY);
                let ptrs: Vec<_> = (0..blocks)
                    .filter_map(|i| arena.allocate(1, 16 + i % 48).ok())
                    .collect();
                for ptr in ptrs.into_iter().step_by(2) {
                    let _ = arena.free(ptr);
                }
                for _ in 0..blocks / 2 {
                    black_box(arena.allocate(1, 8).ok());
                }
                arena.live_bytes()
            });
        });
    }

    group.finish();
}

/// Benchmark: compact a heavily fragmented arena.
fn bench_defragment(c: &mut Criterion) {
    c.bench_function("defragment_4096_blocks", |b| {
        b.iter_batched(
            || {
                let mut arena = CompactingArena::new(CAPACITY);
                let ptrs: Vec<_> = (0..4096)
                    .filter_map(|_| arena.allocate(1, 128).ok())
                    .collect();
                for ptr in ptrs.into_iter().step_by(2) {
                    let _ = arena.free(ptr);
                }
                arena
            },
            |mut arena| black_box(arena.defragment()),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_fixed_churn, bench_compacting_churn, bench_defragment);
criterion_main!(benches);
