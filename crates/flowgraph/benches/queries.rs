use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flowgraph::{gen_flow_network, parse, serialize, GraphConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn queries_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let graph = gen_flow_network(GraphConfig::undirected_weighted(), 1_000, 4_000, 50, &mut rng)
        .unwrap();
    let nodes = graph.nodes();
    let edges = graph.edges();

    c.bench_function("edge_lookup", |b| {
        b.iter(|| {
            for edge in &edges {
                black_box(graph.weight_of(&edge.target, &edge.source));
            }
        });
    });

    c.bench_function("degree_queries", |b| {
        b.iter(|| {
            for node in &nodes {
                black_box(graph.degree_of(node).unwrap());
                black_box(graph.in_degree_of(node).unwrap());
            }
        });
    });

    let text = serialize(&graph).unwrap();
    c.bench_function("json_round_trip", |b| {
        b.iter(|| {
            let restored = parse::<u64, u64>(black_box(&text)).unwrap();
            black_box(serialize(&restored).unwrap());
        });
    });
}

criterion_group!(benches, queries_bench);
criterion_main!(benches);
