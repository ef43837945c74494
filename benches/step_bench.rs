//! Benchmarks for time stepping and diagnostics.
//!
//! Run with: `cargo bench --bench step_bench`
//! Row-parallel variants need `--features parallel`.

use criterion::measurement::WallTime;
use criterion::{
    BenchmarkGroup, BenchmarkId, Criterion, black_box, criterion_group, criterion_main,
};
use swe_grid::{GridDiagnostics, Scenario, SimulationState, SweConfig};

/// Dam-break state advanced past the initial transient.
fn setup_problem<const N: usize>() -> SimulationState<N> {
    let mut sim = SimulationState::<N>::new(SweConfig::default()).unwrap();
    Scenario::BowlDamBreak.apply(&mut sim);
    sim.step_n(20).unwrap();
    sim
}

fn bench_step_size<const N: usize>(group: &mut BenchmarkGroup<'_, WallTime>) {
    let mut sim = setup_problem::<N>();
    group.bench_with_input(BenchmarkId::new("serial", N), &N, |b, _| {
        b.iter(|| black_box(&mut sim).step().unwrap());
    });

    #[cfg(feature = "parallel")]
    {
        let mut sim = setup_problem::<N>();
        group.bench_with_input(BenchmarkId::new("row_parallel", N), &N, |b, _| {
            b.iter(|| black_box(&mut sim).step_parallel().unwrap());
        });
    }
}

/// Benchmark a single full step (advection, momentum, heights).
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    bench_step_size::<64>(&mut group);
    bench_step_size::<128>(&mut group);
    bench_step_size::<256>(&mut group);
    group.finish();
}

/// Benchmark whole-field diagnostics.
fn bench_diagnostics(c: &mut Criterion) {
    let mut group = c.benchmark_group("diagnostics");

    let sim = setup_problem::<128>();
    group.bench_function("compute_128", |b| {
        b.iter(|| GridDiagnostics::compute(black_box(&sim)));
    });
    group.bench_function("divergence_128", |b| {
        b.iter(|| black_box(&sim).divergence(black_box(40), black_box(60)));
    });

    group.finish();
}

criterion_group!(benches, bench_step, bench_diagnostics);
criterion_main!(benches);
