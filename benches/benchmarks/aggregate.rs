use std::path::PathBuf;

use bench_history::store::MemoryStore;
use bench_history::{Aggregator, BenchmarkRecord, DataPaths, History};
use criterion::{black_box, criterion_group, BatchSize, BenchmarkId, Criterion};
use serde_json::json;

fn make_history(len: usize) -> History {
    (0..len)
        .map(|n| BenchmarkRecord::new(json!({ "n": n, "exec_time": { "hello": 0.11, "relative_import": 0.23 } })))
        .collect()
}

fn benchmark_append_and_recent(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_and_recent");
    for len in [10_usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_batched(
                || make_history(len),
                |mut history| {
                    history.append(BenchmarkRecord::new(json!({ "n": len })));
                    black_box(history.recent(20).len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn benchmark_aggregate_run(c: &mut Criterion) {
    let paths = DataPaths {
        current: PathBuf::from("target/release/bench.json"),
        all_data: PathBuf::from("gh-pages/data.json"),
        recent: PathBuf::from("gh-pages/recent.json"),
    };
    let current = serde_json::to_vec(&json!({ "n": 1_000 })).expect("failed to encode current record");
    let all_data = serde_json::to_vec(&make_history(1_000)).expect("failed to encode history");

    c.bench_function("aggregate_run_1000", move |b| {
        b.iter_batched(
            || {
                let store = MemoryStore::default();
                store.insert(paths.current.clone(), current.clone());
                store.insert(paths.all_data.clone(), all_data.clone());
                Aggregator::new(Box::new(store), paths.clone())
            },
            |aggregator| black_box(aggregator.run().expect("aggregate run failed")),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(aggregate, benchmark_append_and_recent, benchmark_aggregate_run);
