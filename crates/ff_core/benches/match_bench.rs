//! Full-match throughput benchmarks.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ff_core::demo::demo_match;
use ff_core::{simulate_batch, simulate_match_json, EngineConfig, MatchEngine, MatchRequest};

fn bench_full_match(c: &mut Criterion) {
    let input = demo_match();

    c.bench_function("full_match_demo", |b| {
        b.iter(|| {
            let report = MatchEngine::new(black_box(&input), black_box(42))
                .map(|engine| engine.run_to_completion());
            black_box(report)
        });
    });
}

fn bench_json_round_trip(c: &mut Criterion) {
    let request = serde_json::to_string(&MatchRequest::new(7, demo_match())).unwrap_or_default();

    c.bench_function("simulate_match_json", |b| {
        b.iter(|| black_box(simulate_match_json(black_box(&request))));
    });
}

fn bench_batch(c: &mut Criterion) {
    // 16 matches over the rayon pool
    let input = demo_match();
    let config = EngineConfig::default();
    let seeds: Vec<u64> = (0..16).collect();

    c.bench_function("batch_16_matches", |b| {
        b.iter(|| black_box(simulate_batch(&input, black_box(&seeds), &config)));
    });
}

criterion_group!(benches, bench_full_match, bench_json_round_trip, bench_batch);
criterion_main!(benches);
