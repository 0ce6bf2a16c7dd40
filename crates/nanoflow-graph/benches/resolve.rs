//! Benchmark: resolution of linear producer chains.
//!
//! Run: `cargo bench -p nanoflow-graph --bench resolve`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nanoflow_graph::{ProducerRegistry, ResolveRequest, Resolver};
use nanoflow_quantity::Scope;
use nanoflow_test_utils::linear_chain;
use std::hint::black_box;

fn bench_linear_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve/linear_chain");

    for &len in &[10, 100, 1_000] {
        let chain = linear_chain(len);
        let mut registry = ProducerRegistry::new();
        registry.register_all(chain.iter().cloned()).unwrap();

        // reversed so every producer waits on a later request entry
        let names: Vec<String> = chain.iter().rev().map(|p| p.name().to_string()).collect();
        let last = format!("step{}", len - 1);
        let request = ResolveRequest::new().scope(Scope::GLOBAL, names, [last]);

        group.bench_with_input(BenchmarkId::from_parameter(len), &request, |b, request| {
            b.iter(|| {
                Resolver::new(&registry)
                    .resolve(black_box(request))
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_linear_chain);
criterion_main!(benches);
