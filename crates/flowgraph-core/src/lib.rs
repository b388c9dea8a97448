#![deny(missing_docs)]
#![doc = "Core data types for the flowgraph engine: edge snapshots, key derivation and structured errors."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod key;

pub use errors::{graph_error, serde_error, ErrorInfo, GraphError};
pub use key::KeyFn;

/// Identifier for a stored edge record.
///
/// A logical undirected edge owns exactly one identifier even though it is
/// reachable from both of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Owned snapshot of an edge as observed from a graph query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<V, W> {
    /// Value of the source node.
    pub source: V,
    /// Value of the target node.
    pub target: V,
    /// Edge weight; present iff the graph is weighted.
    pub value: Option<W>,
    /// Whether the edge is one logical undirected connection.
    pub undirected: bool,
}

impl<V, W> Edge<V, W> {
    /// Returns the same edge observed from the opposite endpoint.
    pub fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            value: self.value,
            undirected: self.undirected,
        }
    }
}
