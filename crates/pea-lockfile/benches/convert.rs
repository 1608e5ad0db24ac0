//! Lockfile conversion benchmarks
//!
//! Measures single-record conversion for each remote kind and batch
//! conversion on the sequential and parallel paths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pea_lockfile::{
    ConversionOptions, Converter, LockfileEntry, PackageKey, RawFieldValue, RawFields,
};

fn create_record(resolved: &str, dependency_count: usize) -> RawFields {
    let mut fields = RawFields::new();
    fields.insert("version".to_string(), RawFieldValue::scalar("1.0.0"));
    fields.insert("resolved".to_string(), RawFieldValue::scalar(resolved));
    fields.insert(
        "dependencies".to_string(),
        RawFieldValue::nested((0..dependency_count).map(|i| (format!("dep-{}", i), "^1.0.0"))),
    );
    fields
}

fn create_entries(count: usize) -> Vec<LockfileEntry> {
    (0..count)
        .map(|i| {
            let resolved = format!("https://registry.example/pkg-{}-1.0.0.tgz#sha1-{:08x}", i, i);
            LockfileEntry::new(
                vec![PackageKey::simple(format!("pkg-{}", i), "^1.0.0")],
                create_record(&resolved, 5),
            )
        })
        .collect()
}

/// Benchmark single-record conversion per remote kind
fn bench_single_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_record");
    let converter = Converter::default();
    let keys = vec![PackageKey::simple("pkg", "^1.0.0")];

    let cases = [
        ("file_remote", "https://registry.example/pkg-1.0.0.tgz#abc123"),
        ("git", "git+https://github.com/a/b#deadbeef"),
        ("file_local", "file:../local-pkg#sha512-xxx"),
    ];

    for (name, resolved) in cases {
        let record = create_record(resolved, 10);
        group.bench_function(name, |b| {
            b.iter(|| black_box(converter.convert(black_box(&record), black_box(&keys))))
        });
    }

    group.finish();
}

/// Benchmark batch conversion with and without the rayon pool
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let sequential = Converter::new(ConversionOptions {
        parallel_threshold: usize::MAX,
        ..ConversionOptions::default()
    });
    let parallel = Converter::new(ConversionOptions {
        parallel_threshold: 0,
        ..ConversionOptions::default()
    });

    for size in [100, 1000, 10000].iter() {
        let entries = create_entries(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &entries, |b, entries| {
            b.iter(|| black_box(sequential.convert_all(entries)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &entries, |b, entries| {
            b.iter(|| black_box(parallel.convert_all(entries)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_record, bench_batch);
criterion_main!(benches);
