use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flowgraph::{gen_flow_network, GraphConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn build_graph_bench(c: &mut Criterion) {
    c.bench_function("build_flow_network_2k", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            let graph =
                gen_flow_network(GraphConfig::directed_weighted(), 2_000, 8_000, 100, &mut rng)
                    .unwrap();
            black_box(graph);
        });
    });

    c.bench_function("build_undirected_network_2k", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            let graph =
                gen_flow_network(GraphConfig::undirected_weighted(), 2_000, 8_000, 100, &mut rng)
                    .unwrap();
            black_box(graph);
        });
    });
}

criterion_group!(benches, build_graph_bench);
criterion_main!(benches);
