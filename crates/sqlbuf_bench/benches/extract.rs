//! Byte view extraction benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sqlbuf_bench::utils::{chunked, random_data, random_text, SIZES};
use sqlbuf_core::{extract, Value};

/// Benchmark the in-place paths.
fn bench_zero_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_zero_copy");

    for size in SIZES {
        group.throughput(Throughput::Bytes(*size as u64));

        let text = random_text(*size);
        group.bench_with_input(BenchmarkId::new("text", size), &text, |b, text| {
            let value = Value::from(text.as_str());
            b.iter(|| {
                let view = extract(black_box(&value)).unwrap();
                black_box(view.len());
            });
        });

        let data = random_data(*size);
        group.bench_with_input(BenchmarkId::new("bytes", size), &data, |b, data| {
            let value = Value::from(data.as_slice());
            b.iter(|| {
                let view = extract(black_box(&value)).unwrap();
                black_box(view.len());
            });
        });
    }

    group.finish();
}

/// Benchmark the paths that create a temporary.
fn bench_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_fallback");

    group.bench_function("integer", |b| {
        let value = Value::from(1_234_567_890_i64);
        b.iter(|| {
            let view = extract(black_box(&value)).unwrap();
            black_box(view.len());
        });
    });

    group.bench_function("float", |b| {
        let value = Value::from(std::f64::consts::PI);
        b.iter(|| {
            let view = extract(black_box(&value)).unwrap();
            black_box(view.len());
        });
    });

    for size in SIZES {
        group.throughput(Throughput::Bytes(*size as u64));
        let data = random_data(*size);
        group.bench_with_input(BenchmarkId::new("chunks_4", size), &data, |b, data| {
            let value = Value::Chunks(chunked(data, 4));
            b.iter(|| {
                let view = extract(black_box(&value)).unwrap();
                black_box(view.len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_zero_copy, bench_fallback);
criterion_main!(benches);
