//! Benchmarks for core types.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use homeval_core::types::{FeatureVector, Price};

fn bench_feature_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_vector");

    let values = [79_545.46, 5.68, 7.01, 4.09, 23_086.8];

    group.bench_function("new", |b| {
        b.iter(|| FeatureVector::new(black_box(values)));
    });

    let vector = FeatureVector::new(values).unwrap();

    group.bench_function("to_array", |b| {
        b.iter(|| black_box(vector).to_array());
    });

    group.finish();
}

fn bench_price_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("price");

    group.bench_function("format_thousands", |b| {
        b.iter(|| black_box(Price::new(450_123.7)).to_string());
    });

    group.bench_function("format_millions", |b| {
        b.iter(|| black_box(Price::new(1_250_000.0)).to_string());
    });

    group.finish();
}

criterion_group!(benches, bench_feature_vector, bench_price_format);
criterion_main!(benches);
