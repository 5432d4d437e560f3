//! Criterion benchmarks for rust_log_sink

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_sink::prelude::*;
use std::sync::Arc;
use std::thread;

// ============================================================================
// Entry Construction Benchmarks
// ============================================================================

fn bench_entry_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("entry_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("plain", |b| {
        b.iter(|| {
            let entry = LogEntry::new(
                LogLevel::Information,
                black_box("event"),
                black_box("message"),
                "bench",
            );
            black_box(entry)
        });
    });

    group.bench_function("with_metadata", |b| {
        b.iter(|| {
            let entry = LogEntry::new(LogLevel::Information, "event", "message", "bench")
                .with_metadata(
                    Metadata::new()
                        .with_field("user_id", 42)
                        .with_field("path", "/api/v1"),
                );
            black_box(entry)
        });
    });

    group.finish();
}

// ============================================================================
// Console Formatting Benchmarks
// ============================================================================

fn bench_console_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("console_format");
    group.throughput(Throughput::Elements(1));

    let entry = LogEntry::new(LogLevel::Warning, "event", "message", "bench")
        .with_metadata(Metadata::new().with_field("k", "v"));

    let plain = ConsoleSettings::new(ColorToken::PLAIN, ColorToken::PLAIN);
    group.bench_function("plain", |b| {
        b.iter(|| black_box(ConsoleWriter::format(black_box(&entry), &plain)));
    });

    let colored = ConsoleSettings::new("blue", "green");
    group.bench_function("colored", |b| {
        b.iter(|| black_box(ConsoleWriter::format(black_box(&entry), &colored)));
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_submit_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_and_drain");

    for &count in &[100usize, 1_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("single_producer_{}", count), |b| {
            b.iter(|| {
                let sink = LogSink::new();
                let consumer = sink
                    .receiver()
                    .spawn(consumer_fn("bench", |_entry| Ok(())))
                    .unwrap();
                for i in 0..count {
                    sink.submit(LogLevel::Debug, &i, "bench", "bench");
                }
                sink.shutdown();
                black_box(consumer.join().unwrap())
            });
        });
    }

    group.throughput(Throughput::Elements(4_000));
    group.bench_function("four_producers_4000", |b| {
        b.iter(|| {
            let sink = Arc::new(LogSink::new());
            let consumer = sink
                .receiver()
                .spawn(consumer_fn("bench", |_entry| Ok(())))
                .unwrap();
            let producers: Vec<_> = (0..4)
                .map(|_| {
                    let sink = Arc::clone(&sink);
                    thread::spawn(move || {
                        for i in 0..1_000 {
                            sink.submit(LogLevel::Debug, &i, "bench", "bench");
                        }
                    })
                })
                .collect();
            for producer in producers {
                producer.join().unwrap();
            }
            sink.shutdown();
            black_box(consumer.join().unwrap())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_entry_creation,
    bench_console_format,
    bench_submit_and_drain
);
criterion_main!(benches);
