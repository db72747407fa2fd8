//! Benchmarks for flowmoments
//!
//! Run with: cargo bench --features full

#[cfg(not(feature = "statistics"))]
compile_error!("Benchmarks require all features. Run: cargo bench --features full");

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use flowmoments::statistics::Moments;
use flowmoments::traits::{MomentSketch, Sketch};

// ============================================================================
// Moments Benchmarks
// ============================================================================

fn bench_moments(c: &mut Criterion) {
    let mut group = c.benchmark_group("moments");
    group.throughput(Throughput::Elements(1));

    group.bench_function("push", |b| {
        let mut stats = Moments::new();
        let mut i = 0u64;
        b.iter(|| {
            stats.push(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("query_all", |b| {
        let mut stats = Moments::new();
        for i in 0..100_000u64 {
            stats.push(i as f64);
        }
        b.iter(|| {
            black_box(stats.mean());
            black_box(stats.variance());
            black_box(stats.stddev());
            black_box(stats.skewness());
            black_box(stats.excess_kurtosis());
        });
    });

    group.bench_function("mean_bounds", |b| {
        let stats: Moments = (0..100_000u64).map(|i| i as f64).collect();
        b.iter(|| black_box(stats.mean_bounds(black_box(0.95))));
    });

    group.bench_function("merge", |b| {
        let mut s1 = Moments::new();
        let mut s2 = Moments::new();
        for i in 0..10_000u64 {
            s1.push(i as f64);
            s2.push((i + 10_000) as f64);
        }
        b.iter(|| {
            let mut s = s1;
            s.merge(black_box(&s2));
            black_box(s)
        });
    });

    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    let partials: Vec<Moments> = (0..64u64)
        .map(|w| (0..1_000u64).map(|i| (w * 1_000 + i) as f64).collect())
        .collect();

    group.throughput(Throughput::Elements(partials.len() as u64));
    group.bench_function("sum_64_partials", |b| {
        b.iter(|| black_box(partials.iter().sum::<Moments>()));
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_moments, bench_reduce);

criterion_main!(benches);
