use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flowgraph::{find_max_flow, gen_flow_network, gen_layered_network, GraphConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn max_flow_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let layered =
        gen_layered_network(GraphConfig::directed_weighted(), 8, 16, 1_000, &mut rng).unwrap();
    let sink = 8 * 16 + 1;
    c.bench_function("max_flow_layered_8x16", |b| {
        b.iter(|| black_box(find_max_flow(&layered, &0, &sink).unwrap()));
    });

    let random =
        gen_flow_network(GraphConfig::undirected_weighted(), 500, 2_500, 100, &mut rng).unwrap();
    c.bench_function("max_flow_random_undirected_500", |b| {
        b.iter(|| black_box(find_max_flow(&random, &0, &499).unwrap()));
    });
}

criterion_group!(benches, max_flow_bench);
criterion_main!(benches);
