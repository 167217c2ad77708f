//! Benchmark for PersistentSet vs standard HashSet.
//!
//! Compares per-element updates, bulk building, and set algebra against
//! Rust's standard `HashSet` for common operations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use permafrost::collections::PersistentSet;
use std::collections::HashSet;
use std::hint::black_box;

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("PersistentSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut set = PersistentSet::new();
                    for value in 0..size {
                        set = set.insert(black_box(value));
                    }
                    black_box(set)
                });
            },
        );

        // Bulk building through the transient builder path
        group.bench_with_input(
            BenchmarkId::new("PersistentSet::from_iter", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let set: PersistentSet<i64> = (0..size).map(black_box).collect();
                    black_box(set)
                });
            },
        );

        // Standard HashSet insert
        group.bench_with_input(
            BenchmarkId::new("HashSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut set = HashSet::new();
                    for value in 0..size {
                        set.insert(black_box(value));
                    }
                    black_box(set)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// contains Benchmark
// =============================================================================

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("contains");

    for size in [1_000, 10_000, 100_000] {
        let persistent_set: PersistentSet<i64> = (0..size).collect();
        let standard_set: HashSet<i64> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut hits = 0usize;
                    for value in 0..size {
                        if persistent_set.contains(&black_box(value)) {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("HashSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut hits = 0usize;
                    for value in 0..size {
                        if standard_set.contains(&black_box(value)) {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Set Algebra Benchmark
// =============================================================================

fn benchmark_algebra(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("algebra");

    for size in [1_000, 10_000, 100_000] {
        let left: PersistentSet<i64> = (0..size).collect();
        let right: PersistentSet<i64> = (size / 2..size + size / 2).collect();

        group.bench_with_input(BenchmarkId::new("union", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.union(&right)));
        });

        group.bench_with_input(
            BenchmarkId::new("intersection", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(left.intersection(&right)));
            },
        );

        group.bench_with_input(BenchmarkId::new("difference", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.difference(&right)));
        });

        // Union with self is the structural-sharing fast path.
        group.bench_with_input(
            BenchmarkId::new("union_self", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(left.union(&left)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_contains,
    benchmark_algebra
);
criterion_main!(benches);
