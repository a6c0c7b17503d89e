use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use crossbeam_channel::unbounded;

use log_analyzer::parser::parse_line;
use log_analyzer::stats::Stats;
use log_analyzer::{NullSink, ParallelConfig, ParallelProcessor};

fn sample_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let level = if i % 10 == 0 { "ERROR" } else { "INFO" };
            format!(
                "2026-02-01T10:15:{:02}Z {} {} /api/v1/item/{} {}ms",
                i % 60,
                level,
                if level == "ERROR" { 500 } else { 200 },
                i % 50,
                i % 700
            )
        })
        .collect()
}

fn bench_parse_line(c: &mut Criterion) {
    let line = "2026-02-01T10:15:01Z INFO 200 /api/login 120ms";
    c.bench_function("parse_line", |b| {
        b.iter(|| {
            black_box(parse_line(black_box(line))).ok();
        });
    });
}

fn bench_ingest(c: &mut Criterion) {
    let entries: Vec<_> = sample_lines(10_000)
        .iter()
        .filter_map(|line| parse_line(line).ok())
        .collect();

    c.bench_function("ingest_10k", |b| {
        b.iter(|| {
            let mut stats = Stats::new();
            for entry in &entries {
                stats.ingest(black_box(entry));
            }
            black_box(stats)
        });
    });
}

fn bench_pipeline_workers(c: &mut Criterion) {
    let lines = sample_lines(100_000);
    let mut group = c.benchmark_group("pipeline_100k");
    group.sample_size(10);

    for workers in [1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.iter(|| {
                let (_ctrl_tx, ctrl_rx) = unbounded();
                let processor = ParallelProcessor::new(ParallelConfig {
                    num_workers: workers,
                    buffer_size: 1000,
                });
                let result = processor
                    .process_lines(lines.clone(), Arc::new(NullSink), ctrl_rx)
                    .expect("pipeline should complete");
                black_box(result.stats)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_line, bench_ingest, bench_pipeline_workers);
criterion_main!(benches);
