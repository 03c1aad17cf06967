//! Filter and group evaluation over a synthetic read stream.

use ale_engine::{CompiledCycle, CycleDeclaration, EngineConfig, PatternEngine, PatternUsage};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn create_reads(count: usize) -> Vec<String> {
    let companies = ["0614141", "0037000", "0012345", "0098765"];

    (0..count)
        .map(|i| {
            format!(
                "urn:epc:tag:sgtin-96:3.{}.{}.{}",
                companies[i % companies.len()],
                40 + i % 30,
                i
            )
        })
        .collect()
}

fn create_cycle(config: EngineConfig) -> anyhow::Result<(PatternEngine, CompiledCycle)> {
    let engine = PatternEngine::with_config(config)?;
    let cycle = engine.compile(
        &CycleDeclaration::new("bench")
            .include("urn:epc:pat:sgtin-96:*.*.[40-59].*")
            .exclude("urn:epc:pat:sgtin-96:*.0012345.*.*")
            .group("urn:epc:pat:sgtin-96:*.X.[40-49].*")
            .group("urn:epc:pat:sgtin-96:*.X.[50-59].*"),
    )?;
    Ok((engine, cycle))
}

fn bench_single_pattern(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_pattern");
    let engine = PatternEngine::new();
    let filter = engine
        .parse_pattern("urn:epc:pat:sgtin-96:*.*.50.*", PatternUsage::Filter)
        .unwrap();
    let grouping = engine
        .parse_pattern("urn:epc:pat:sgtin-96:*.X.50.*", PatternUsage::Group)
        .unwrap();
    let tag = "urn:epc:tag:sgtin-96:3.0614141.50.400";

    group.bench_function("is_member", |b| b.iter(|| filter.is_member(black_box(tag))));
    group.bench_function("group_name", |b| {
        b.iter(|| grouping.group_name(black_box(tag)))
    });
    group.bench_function("parse_group_pattern", |b| {
        b.iter(|| {
            engine.parse_pattern(
                black_box("urn:epc:pat:sgtin-96:*.X.[0-100].*"),
                PatternUsage::Group,
            )
        })
    });
    group.finish();
}

fn bench_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_batch");

    for size in [100, 1_000, 10_000] {
        let reads = create_reads(size);
        group.throughput(Throughput::Elements(size as u64));

        for (label, config) in [
            ("sequential", EngineConfig::sequential()),
            ("parallel", EngineConfig::high_throughput()),
        ] {
            let (engine, cycle) = create_cycle(config).unwrap();
            group.bench_with_input(BenchmarkId::new(label, size), &reads, |b, reads| {
                b.iter(|| engine.group_batch(&cycle, black_box(reads)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_single_pattern, bench_batches);
criterion_main!(benches);
