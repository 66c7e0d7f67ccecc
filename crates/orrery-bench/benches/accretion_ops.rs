//! Criterion benchmarks for disk initialization and the accretion loop.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orrery_bench::{dense_disk, reference_disk};
use orrery_core::{PhysicsContext, SimRng};
use orrery_disk::{initialize_disk, simulate, AccretionConfig};

/// Benchmark: draw the default 100-body disk population.
fn bench_initialize_disk_100(c: &mut Criterion) {
    let ctx = PhysicsContext::default();
    let cfg = reference_disk();

    c.bench_function("initialize_disk_100", |b| {
        b.iter(|| {
            let mut rng = SimRng::from_seed(42);
            let bodies = initialize_disk(&cfg, &ctx, &mut rng).unwrap();
            black_box(bodies);
        });
    });
}

/// Benchmark: draw a dense 1000-body disk population.
fn bench_initialize_disk_1000(c: &mut Criterion) {
    let ctx = PhysicsContext::default();
    let cfg = dense_disk();

    c.bench_function("initialize_disk_1000", |b| {
        b.iter(|| {
            let mut rng = SimRng::from_seed(42);
            let bodies = initialize_disk(&cfg, &ctx, &mut rng).unwrap();
            black_box(bodies);
        });
    });
}

/// Benchmark: 500 accretion iterations over the default disk.
///
/// Capped below the stability-check threshold so every run does the same
/// amount of work regardless of how quickly the population collapses.
fn bench_accretion_500_iterations(c: &mut Criterion) {
    let ctx = PhysicsContext::default();
    let disk_cfg = reference_disk();
    let accretion_cfg = AccretionConfig {
        max_iterations: 500,
        ..AccretionConfig::default()
    };

    c.bench_function("accretion_500_iterations", |b| {
        b.iter(|| {
            let mut rng = SimRng::from_seed(42);
            let bodies = initialize_disk(&disk_cfg, &ctx, &mut rng).unwrap();
            let result = simulate(&accretion_cfg, &ctx, bodies, &mut rng).unwrap();
            black_box(result);
        });
    });
}

criterion_group!(
    benches,
    bench_initialize_disk_100,
    bench_initialize_disk_1000,
    bench_accretion_500_iterations
);
criterion_main!(benches);
