use flowgraph_core::errors::{graph_error, GraphError};
use flowgraph_core::KeyFn;
use rand::Rng;

use crate::config::GraphConfig;
use crate::graph::Graph;

/// Generates a weighted flow network with nodes `0..n_nodes`.
///
/// Up to `n_edges` edges are drawn uniformly, with capacities in
/// `0..=max_capacity`. Self-loops are allowed; drawing an already connected
/// pair overwrites its capacity, so the final edge count may be lower.
pub fn gen_flow_network<R: Rng>(
    config: GraphConfig,
    n_nodes: u64,
    n_edges: usize,
    max_capacity: u64,
    rng: &mut R,
) -> Result<Graph<u64, u64>, GraphError> {
    if n_nodes == 0 {
        return Err(graph_error(
            "empty-graph",
            "flow network generator requires at least one node",
        ));
    }
    if !config.is_weighted() {
        return Err(graph_error(
            "unweighted-graph",
            "flow networks need edge capacities",
        ));
    }

    let mut graph = Graph::new(config, KeyFn::identity());
    graph.insert_all(0..n_nodes);
    for _ in 0..n_edges {
        let source = rng.gen_range(0..n_nodes);
        let target = rng.gen_range(0..n_nodes);
        let capacity = rng.gen_range(0..=max_capacity);
        graph.connect(&source, &target, Some(capacity))?;
    }
    Ok(graph)
}

/// Generates a layered network: a source `0`, `layers` layers of `width`
/// nodes each, and a sink. Every node of a layer feeds every node of the next.
pub fn gen_layered_network<R: Rng>(
    config: GraphConfig,
    layers: u64,
    width: u64,
    max_capacity: u64,
    rng: &mut R,
) -> Result<Graph<u64, u64>, GraphError> {
    if layers == 0 || width == 0 {
        return Err(graph_error(
            "empty-graph",
            "layered network generator requires at least one layer of one node",
        ));
    }
    if !config.is_weighted() {
        return Err(graph_error(
            "unweighted-graph",
            "flow networks need edge capacities",
        ));
    }
    let sink = layers * width + 1;
    let mut graph = Graph::new(config, KeyFn::identity());
    graph.insert_all(0..=sink);

    let layer_nodes = move |layer: u64| (0..width).map(move |offset| 1 + layer * width + offset);
    for node in layer_nodes(0) {
        graph.connect(&0, &node, Some(rng.gen_range(0..=max_capacity)))?;
    }
    for layer in 1..layers {
        for from in layer_nodes(layer - 1) {
            for to in layer_nodes(layer) {
                graph.connect(&from, &to, Some(rng.gen_range(0..=max_capacity)))?;
            }
        }
    }
    for node in layer_nodes(layers - 1) {
        graph.connect(&node, &sink, Some(rng.gen_range(0..=max_capacity)))?;
    }
    Ok(graph)
}
