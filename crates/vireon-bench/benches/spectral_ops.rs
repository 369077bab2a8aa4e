//! Criterion micro-benchmarks for the frequency-domain metrics.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use vireon_bench::warm_model;
use vireon_core::Field;
use vireon_eval::{
    anisotropy, eval_field, eval_time_drift, radial_average, structure_factor, EvalConfig,
};

fn pattern(n: usize) -> Field {
    let fields = warm_model(n, 500, 7).into_fields();
    fields["v"].clone()
}

/// Benchmark: structure factor (2D FFT) of a 128×128 pattern.
fn bench_structure_factor_128(c: &mut Criterion) {
    let field = pattern(128);
    c.bench_function("structure_factor_128", |b| {
        b.iter(|| black_box(structure_factor(black_box(&field))));
    });
}

/// Benchmark: radial average and anisotropy of a precomputed spectrum.
fn bench_radial_and_anisotropy_128(c: &mut Criterion) {
    let s = structure_factor(&pattern(128));
    c.bench_function("radial_average_128", |b| {
        b.iter(|| black_box(radial_average(black_box(&s))));
    });
    c.bench_function("anisotropy_128", |b| {
        b.iter(|| black_box(anisotropy(black_box(&s))));
    });
}

/// Benchmark: full per-field evaluation and a 10-frame drift series.
fn bench_eval_128(c: &mut Criterion) {
    let field = pattern(128);
    let cfg = EvalConfig::default();
    c.bench_function("eval_field_128", |b| {
        b.iter(|| black_box(eval_field(black_box(&field), &cfg)));
    });

    let frames: Vec<Field> = (0..10)
        .map(|i| warm_model(64, 50 * i, 3).into_fields()["v"].clone())
        .collect();
    let refs: Vec<&Field> = frames.iter().collect();
    c.bench_function("eval_time_drift_64x10", |b| {
        b.iter(|| black_box(eval_time_drift(black_box(&refs))));
    });
}

criterion_group!(
    benches,
    bench_structure_factor_128,
    bench_radial_and_anisotropy_128,
    bench_eval_128
);
criterion_main!(benches);
