use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use duelgen::comparator::count_matches;
use duelgen::config::DIVISOR;
use duelgen::generator::generate;
use duelgen::runner::{self, Strategy};
use duelgen::{BenchConfig, StreamParams};
use std::num::NonZeroUsize;

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    let params = StreamParams::new(65, 16807);

    for pairs in [1_000, 100_000, 1_000_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(pairs), pairs, |b, &pairs| {
            b.iter(|| black_box(generate(params, pairs, DIVISOR).unwrap()));
        });
    }
    group.finish();
}

fn bench_comparator(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparator");

    for pairs in [1_000, 100_000, 1_000_000].iter() {
        let a = generate(StreamParams::new(65, 16807), *pairs, DIVISOR).unwrap().value;
        let b = generate(StreamParams::new(8921, 48271), *pairs, DIVISOR).unwrap().value;

        group.bench_with_input(BenchmarkId::from_parameter(pairs), pairs, |bench, &pairs| {
            bench.iter(|| black_box(count_matches(a.as_slice(), b.as_slice(), pairs).unwrap()));
        });
    }
    group.finish();
}

// Small inputs show the pool and channel overhead; large ones the parallel gain
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");
    group.sample_size(10);

    for pairs in [1_000, 100_000, 2_000_000].iter() {
        let config = BenchConfig::default().with_pair_count(*pairs);

        for strategy in [Strategy::Sequential, Strategy::Concurrent] {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), pairs),
                &config,
                |b, config| {
                    b.iter(|| black_box(runner::run(config, strategy).unwrap()));
                },
            );
        }
    }
    group.finish();
}

fn bench_worker_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_threads");
    group.sample_size(10);

    for threads in [2, 4, 8].iter() {
        let config = BenchConfig::default()
            .with_pair_count(1_000_000)
            .with_worker_threads(NonZeroUsize::new(*threads).unwrap());

        group.bench_with_input(BenchmarkId::from_parameter(threads), threads, |b, _| {
            b.iter(|| black_box(runner::run(&config, Strategy::Concurrent).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generator,
    bench_comparator,
    bench_strategies,
    bench_worker_threads
);
criterion_main!(benches);
