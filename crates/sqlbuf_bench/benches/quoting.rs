//! Quoting benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sqlbuf_bench::utils::{escape_heavy_text, random_data, random_text, SIZES};
use sqlbuf_core::{
    make_pgarray, quote_bytea_raw, quote_copy, quote_ident, quote_literal, unquote_literal, Value,
};

/// Benchmark literal and COPY quoting.
fn bench_quote(c: &mut Criterion) {
    let mut group = c.benchmark_group("quote");

    for size in SIZES {
        group.throughput(Throughput::Bytes(*size as u64));

        let plain = random_text(*size);
        group.bench_with_input(BenchmarkId::new("literal_plain", size), &plain, |b, s| {
            let value = Value::from(s.as_str());
            b.iter(|| black_box(quote_literal(black_box(&value)).unwrap()));
        });

        let heavy = escape_heavy_text(*size, 8);
        group.bench_with_input(BenchmarkId::new("literal_escaped", size), &heavy, |b, s| {
            let value = Value::from(s.as_str());
            b.iter(|| black_box(quote_literal(black_box(&value)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("copy_escaped", size), &heavy, |b, s| {
            let value = Value::from(s.as_str());
            b.iter(|| black_box(quote_copy(black_box(&value)).unwrap()));
        });

        let data = random_data(*size);
        group.bench_with_input(BenchmarkId::new("bytea_raw", size), &data, |b, data| {
            let value = Value::from(data.as_slice());
            b.iter(|| black_box(quote_bytea_raw(black_box(&value)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark unquoting.
fn bench_unquote(c: &mut Criterion) {
    let mut group = c.benchmark_group("unquote");

    for size in SIZES {
        group.throughput(Throughput::Bytes(*size as u64));
        let heavy = escape_heavy_text(*size, 8);
        let quoted = quote_literal(&Value::from(heavy.as_str())).unwrap();
        group.bench_with_input(BenchmarkId::new("literal_extended", size), &quoted, |b, q| {
            b.iter(|| black_box(unquote_literal(black_box(q), false).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark identifier quoting and array building.
fn bench_misc(c: &mut Criterion) {
    let mut group = c.benchmark_group("misc");

    group.bench_function("ident_plain", |b| {
        b.iter(|| black_box(quote_ident(black_box("customer_orders"))));
    });
    group.bench_function("ident_keyword", |b| {
        b.iter(|| black_box(quote_ident(black_box("select"))));
    });

    group.bench_function("pgarray_100", |b| {
        let items: Vec<String> = (0..100).map(|i| format!("item {i}")).collect();
        let values: Vec<Value<'_>> = items.iter().map(|s| Value::from(s.as_str())).collect();
        b.iter(|| black_box(make_pgarray(black_box(&values)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_quote, bench_unquote, bench_misc);
criterion_main!(benches);
