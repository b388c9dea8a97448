#![deny(missing_docs)]

//! Generic directed/undirected, weighted/unweighted graphs with key-derived
//! node identity, an Edmonds-Karp maximum flow solver and a strict JSON
//! serialization format.

mod builder;
mod config;
mod generators;
mod graph;
mod hash;
mod max_flow;
mod serialization;
mod traversal;

pub use builder::GraphBuilder;
pub use config::GraphConfig;
pub use generators::{gen_flow_network, gen_layered_network};
pub use graph::Graph;
pub use hash::canonical_hash;
pub use max_flow::{find_max_flow, Capacity, MaxFlow};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{
    from_bytes, from_bytes_with_key, parse, parse_with_key, serialize, to_bytes,
    try_parse_with_key,
};

pub use flowgraph_core::{Edge, EdgeId, ErrorInfo, GraphError, KeyFn};
