//! Criterion microbenches for datecrawl manifest handling.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Manifest parsing (from_manifest_str)
//! - Manifest writing (to_manifest_string)
//! - Cursor traversal across the wraparound

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use datecrawl::cursor::DatasetCursor;
use datecrawl::dataset::manifest::{from_manifest_str, to_manifest_string};
use datecrawl::dataset::AssetPathPair;

fn sample_pairs(n: usize) -> Vec<AssetPathPair> {
    (0..n)
        .map(|i| {
            let rel = format!("range_{}/{:06}.jpg", i % 4, i + 1);
            AssetPathPair::new(format!("/data/bear/out/{rel}"), rel).unwrap()
        })
        .collect()
}

/// Benchmark manifest parsing from string.
fn bench_manifest_parse(c: &mut Criterion) {
    let text = to_manifest_string(&sample_pairs(4000)).unwrap();
    let mut group = c.benchmark_group("manifest_parse");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("from_manifest_str", |b| {
        b.iter(|| {
            let pairs = from_manifest_str(black_box(&text)).unwrap();
            black_box(pairs)
        })
    });

    group.finish();
}

/// Benchmark manifest writing to string.
fn bench_manifest_write(c: &mut Criterion) {
    let pairs = sample_pairs(4000);
    let mut group = c.benchmark_group("manifest_write");
    group.throughput(Throughput::Elements(pairs.len() as u64));

    group.bench_function("to_manifest_string", |b| {
        b.iter(|| {
            let text = to_manifest_string(black_box(&pairs)).unwrap();
            black_box(text)
        })
    });

    group.finish();
}

/// Benchmark two full passes over a cursor.
fn bench_cursor_cycle(c: &mut Criterion) {
    let pairs = sample_pairs(4000);
    let mut group = c.benchmark_group("cursor");
    group.throughput(Throughput::Elements(2 * pairs.len() as u64));

    group.bench_function("next_pair_two_passes", |b| {
        b.iter(|| {
            let mut cursor = DatasetCursor::from_pairs(pairs.clone());
            for _ in 0..2 * pairs.len() {
                black_box(cursor.next_pair().unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_manifest_parse,
    bench_manifest_write,
    bench_cursor_cycle
);
criterion_main!(benches);
