use flowgraph_core::errors::{serde_error, GraphError};
use flowgraph_core::{Edge, KeyFn};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::GraphConfig;
use crate::graph::Graph;

const TOP_LEVEL_FIELDS: [&str; 4] = ["undirected", "unweighted", "nodes", "edges"];

/// Serializes the graph to its JSON text form.
///
/// `value` is emitted on each edge iff the graph is weighted.
pub fn serialize<V, W, K>(graph: &Graph<V, W, K>) -> Result<String, GraphError>
where
    V: Clone + Serialize,
    W: Clone + Serialize,
    K: Ord + Clone,
{
    let document = JsonGraph {
        undirected: graph.is_undirected(),
        unweighted: graph.is_unweighted(),
        nodes: graph.nodes(),
        edges: graph
            .edges()
            .into_iter()
            .map(|edge| JsonEdge {
                source: edge.source,
                target: edge.target,
                value: edge.value,
            })
            .collect(),
    };
    serde_json::to_string(&document)
        .map_err(|err| serde_error("serialize-json", err.to_string()))
}

/// Parses a graph whose nodes are their own keys.
///
/// Returns `None` on any malformed input; nothing is partially built.
pub fn parse<V, W>(text: &str) -> Option<Graph<V, W, V>>
where
    V: DeserializeOwned + Clone + Ord + 'static,
    W: DeserializeOwned,
{
    parse_with_key(text, KeyFn::identity())
}

/// Parses a graph, deriving node identity with `key_fn`.
///
/// Returns `None` on any malformed input; the reason is logged at debug level
/// and available from [`try_parse_with_key`].
pub fn parse_with_key<V, W, K>(text: &str, key_fn: KeyFn<V, K>) -> Option<Graph<V, W, K>>
where
    V: DeserializeOwned,
    W: DeserializeOwned,
    K: Ord + Clone,
{
    match try_parse_with_key(text, key_fn) {
        Ok(graph) => Some(graph),
        Err(err) => {
            debug!("rejecting serialized graph: {err}");
            None
        }
    }
}

/// Parses a graph, reporting why the input was rejected.
///
/// The whole document is validated before the graph is touched: the top level
/// must hold exactly `undirected` and `unweighted` booleans plus `nodes` and
/// `edges` arrays, and every edge needs `source`, `target` and, for weighted
/// graphs, `value`.
pub fn try_parse_with_key<V, W, K>(
    text: &str,
    key_fn: KeyFn<V, K>,
) -> Result<Graph<V, W, K>, GraphError>
where
    V: DeserializeOwned,
    W: DeserializeOwned,
    K: Ord + Clone,
{
    let document: Value =
        serde_json::from_str(text).map_err(|err| serde_error("invalid-json", err.to_string()))?;
    let object = document
        .as_object()
        .ok_or_else(|| serde_error("not-an-object", "serialized graph must be a JSON object"))?;
    if let Some(extra) = object
        .keys()
        .find(|field| !TOP_LEVEL_FIELDS.contains(&field.as_str()))
    {
        return Err(serde_error("unknown-field", "unexpected top-level field").in_field(extra));
    }

    let undirected = required(object, "undirected")?
        .as_bool()
        .ok_or_else(|| invalid_field("undirected", "boolean"))?;
    let unweighted = required(object, "unweighted")?
        .as_bool()
        .ok_or_else(|| invalid_field("unweighted", "boolean"))?;
    let nodes = required(object, "nodes")?
        .as_array()
        .ok_or_else(|| invalid_field("nodes", "array"))?;
    let edges = required(object, "edges")?
        .as_array()
        .ok_or_else(|| invalid_field("edges", "array"))?;

    for (index, edge) in edges.iter().enumerate() {
        let edge = edge
            .as_object()
            .ok_or_else(|| invalid_edge(index, "edge must be a JSON object"))?;
        for field in ["source", "target"] {
            if !edge.contains_key(field) {
                return Err(invalid_edge(index, "edge is missing an endpoint").in_field(field));
            }
        }
        if !unweighted && !edge.contains_key("value") {
            return Err(invalid_edge(index, "weighted edge is missing its value").in_field("value"));
        }
    }

    let nodes = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            decode::<V>(node, "invalid-node").map_err(|err| err.at_node(index))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let edges = edges
        .iter()
        .enumerate()
        .map(|(index, edge)| -> Result<Edge<V, W>, GraphError> {
            let endpoint = |field: &str| {
                decode::<V>(&edge[field], "invalid-node")
                    .map_err(|err| err.at_edge(index).in_field(field))
            };
            let value = if unweighted {
                None
            } else {
                Some(
                    decode::<W>(&edge["value"], "invalid-value")
                        .map_err(|err| err.at_edge(index).in_field("value"))?,
                )
            };
            Ok(Edge {
                source: endpoint("source")?,
                target: endpoint("target")?,
                value,
                undirected,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    assemble(
        GraphConfig {
            undirected,
            unweighted,
        },
        key_fn,
        nodes,
        edges,
    )
}

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn to_bytes<V, W, K>(graph: &Graph<V, W, K>) -> Result<Vec<u8>, GraphError>
where
    V: Clone + Serialize,
    W: Clone + Serialize,
    K: Ord + Clone,
{
    let snapshot = GraphSnapshot {
        undirected: graph.is_undirected(),
        unweighted: graph.is_unweighted(),
        nodes: graph.nodes(),
        edges: graph.edges(),
    };
    bincode::serialize(&snapshot).map_err(|err| serde_error("serialize-bytes", err.to_string()))
}

/// Restores a graph whose nodes are their own keys from its binary representation.
pub fn from_bytes<V, W>(bytes: &[u8]) -> Result<Graph<V, W, V>, GraphError>
where
    V: DeserializeOwned + Clone + Ord + 'static,
    W: DeserializeOwned,
{
    from_bytes_with_key(bytes, KeyFn::identity())
}

/// Restores a graph from its binary representation, deriving keys with `key_fn`.
pub fn from_bytes_with_key<V, W, K>(
    bytes: &[u8],
    key_fn: KeyFn<V, K>,
) -> Result<Graph<V, W, K>, GraphError>
where
    V: DeserializeOwned,
    W: DeserializeOwned,
    K: Ord + Clone,
{
    let snapshot: GraphSnapshot<V, W> = bincode::deserialize(bytes)
        .map_err(|err| serde_error("deserialize-bytes", err.to_string()))?;
    assemble(
        GraphConfig {
            undirected: snapshot.undirected,
            unweighted: snapshot.unweighted,
        },
        key_fn,
        snapshot.nodes,
        snapshot.edges,
    )
}

/// Inserts every node, then connects every edge in listed order.
fn assemble<V, W, K>(
    config: GraphConfig,
    key_fn: KeyFn<V, K>,
    nodes: Vec<V>,
    edges: Vec<Edge<V, W>>,
) -> Result<Graph<V, W, K>, GraphError>
where
    K: Ord + Clone,
{
    let mut graph = Graph::new(config, key_fn);
    graph.insert_all(nodes);
    for (index, edge) in edges.into_iter().enumerate() {
        let value = if config.unweighted { None } else { edge.value };
        graph
            .connect(&edge.source, &edge.target, value)
            .map_err(|err| {
                serde_error("invalid-edge", err.info().message.clone())
                    .at_edge(index)
                    .with_context("cause", err.code())
            })?;
    }
    Ok(graph)
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value, GraphError> {
    object
        .get(field)
        .ok_or_else(|| {
            serde_error("missing-field", "required field is absent").in_field(field)
        })
}

fn invalid_field(field: &str, expected: &str) -> GraphError {
    serde_error("invalid-field", "field has the wrong type")
        .in_field(field)
        .with_context("expected", expected)
}

fn invalid_edge(index: usize, message: &str) -> GraphError {
    serde_error("invalid-edge", message).at_edge(index)
}

fn decode<T: DeserializeOwned>(value: &Value, code: &str) -> Result<T, GraphError> {
    T::deserialize(value).map_err(|err| serde_error(code, err.to_string()))
}

#[derive(Serialize)]
struct JsonGraph<V, W> {
    undirected: bool,
    unweighted: bool,
    nodes: Vec<V>,
    edges: Vec<JsonEdge<V, W>>,
}

#[derive(Serialize)]
struct JsonEdge<V, W> {
    source: V,
    target: V,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<W>,
}

/// Binary layout; unlike the JSON form every field is always present.
#[derive(Serialize, Deserialize)]
struct GraphSnapshot<V, W> {
    undirected: bool,
    unweighted: bool,
    nodes: Vec<V>,
    edges: Vec<Edge<V, W>>,
}
