use flowgraph_core::errors::{serde_error, GraphError};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::GraphConfig;
use crate::graph::Graph;

/// Computes the canonical structural hash for the provided graph.
///
/// The digest covers the mode flags, every node value in key order and every
/// edge with its value. Edges are sorted by endpoint keys, and undirected edges
/// are encoded with their endpoints in ascending key order, so two graphs
/// holding the same nodes and edges hash identically regardless of insertion
/// or connection order.
pub fn canonical_hash<V, W, K>(graph: &Graph<V, W, K>) -> Result<String, GraphError>
where
    V: Serialize,
    W: Serialize,
    K: Ord + Clone,
{
    let mut hasher = Sha256::new();
    encode_config(&graph.config(), &mut hasher);

    let nodes: Vec<(&K, &V)> = graph.node_entries().collect();
    hasher.update((nodes.len() as u64).to_le_bytes());
    for (_, value) in &nodes {
        update_json(*value, &mut hasher)?;
    }

    let mut edges: Vec<(&K, &K, Option<&W>)> = graph
        .edge_records()
        .map(|record| {
            let (first, second) = if graph.is_undirected() && record.target < record.source {
                (&record.target, &record.source)
            } else {
                (&record.source, &record.target)
            };
            (first, second, record.value.as_ref())
        })
        .collect();
    edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    hasher.update((edges.len() as u64).to_le_bytes());
    for (source, target, value) in edges {
        for endpoint in [source, target] {
            match graph.value_by_key(endpoint) {
                Some(node) => update_json(node, &mut hasher)?,
                None => hasher.update(b"endpoint:missing"),
            }
        }
        match value {
            Some(value) => {
                hasher.update(b"value:some");
                update_json(value, &mut hasher)?;
            }
            None => hasher.update(b"value:none"),
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}

fn encode_config(config: &GraphConfig, hasher: &mut Sha256) {
    if config.undirected {
        hasher.update(b"undirected");
    } else {
        hasher.update(b"directed");
    }
    if config.unweighted {
        hasher.update(b"unweighted");
    } else {
        hasher.update(b"weighted");
    }
}

fn update_json<T: Serialize + ?Sized>(value: &T, hasher: &mut Sha256) -> Result<(), GraphError> {
    let bytes =
        serde_json::to_vec(value).map_err(|err| serde_error("hash-encode", err.to_string()))?;
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(&bytes);
    Ok(())
}
