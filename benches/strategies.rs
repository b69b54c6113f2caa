//! Criterion comparison of the CPU-side strategies on a reduced grid.
//! The main binary remains the place for full-size runs and the SQL/GPU
//! backends; this bench is for tracking regressions in the hot kernels.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mandelbench::field::{scalar, vectorized, FieldParams};

fn field_benchmarks(c: &mut Criterion) {
    let params = FieldParams::new(350, 200, 64).unwrap();

    c.bench_function("scalar", |b| {
        b.iter(|| black_box(scalar::compute(&params)));
    });

    c.bench_function("scalar_rayon", |b| {
        b.iter(|| black_box(scalar::compute_parallel(&params)));
    });

    c.bench_function("vectorized_masked", |b| {
        b.iter(|| black_box(vectorized::compute(&params)));
    });

    #[cfg(feature = "simd")]
    c.bench_function("simd_f64x4", |b| {
        b.iter(|| black_box(mandelbench::field::simd::compute(&params)));
    });
}

criterion_group!(benches, field_benchmarks);
criterion_main!(benches);
