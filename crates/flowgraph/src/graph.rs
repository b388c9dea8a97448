use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use flowgraph_core::errors::{graph_error, GraphError};
use flowgraph_core::{Edge, EdgeId, KeyFn};

use crate::config::GraphConfig;

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord<V, K> {
    value: V,
    outgoing: BTreeMap<K, EdgeId>,
    incoming: BTreeMap<K, EdgeId>,
}

impl<V, K: Ord> NodeRecord<V, K> {
    fn new(value: V) -> Self {
        Self {
            value,
            outgoing: BTreeMap::new(),
            incoming: BTreeMap::new(),
        }
    }
}

/// Stored edge. Undirected edges keep the orientation they were first
/// connected with; the indexes make both orientations observable.
#[derive(Debug, Clone)]
pub(crate) struct EdgeRecord<K, W> {
    pub(crate) source: K,
    pub(crate) target: K,
    pub(crate) value: Option<W>,
}

/// Graph over node values `V` identified by keys `K`, with optional edge values `W`.
///
/// Orientation and weight mode are fixed by the [`GraphConfig`] supplied at
/// construction. Nodes are stored by derived key, so inserting a value whose
/// key already exists replaces the stored value and keeps its edges.
///
/// A logical undirected edge is one record registered under both `(a, b)` and
/// `(b, a)` in the per-node indexes. Linking and unlinking both orientations
/// happens inside a single `&mut self` call, so no caller can observe an
/// undirected edge from one side only.
#[derive(Debug, Clone)]
pub struct Graph<V, W = (), K = V> {
    config: GraphConfig,
    key_fn: KeyFn<V, K>,
    nodes: BTreeMap<K, NodeRecord<V, K>>,
    edges: BTreeMap<EdgeId, EdgeRecord<K, W>>,
    next_edge: u64,
}

impl<V, W, K> Graph<V, W, K>
where
    K: Ord + Clone,
{
    /// Creates an empty graph with the given modes and key derivation.
    pub fn new(config: GraphConfig, key_fn: KeyFn<V, K>) -> Self {
        Self {
            config,
            key_fn,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            next_edge: 0,
        }
    }

    /// Creates an empty graph sharing this graph's modes and key function.
    pub fn empty_like(&self) -> Self {
        Self::new(self.config, self.key_fn.clone())
    }

    /// Returns the modes this graph was built with.
    pub fn config(&self) -> GraphConfig {
        self.config
    }

    /// Returns whether edges are logical bidirectional connections.
    pub fn is_undirected(&self) -> bool {
        self.config.undirected
    }

    /// Returns whether edges carry no value.
    pub fn is_unweighted(&self) -> bool {
        self.config.unweighted
    }

    /// Returns the key-derivation function used for node identity.
    pub fn key_fn(&self) -> &KeyFn<V, K> {
        &self.key_fn
    }

    /// Derives the key of `value` without touching the graph.
    pub fn key_of(&self, value: &V) -> K {
        self.key_fn.derive(value)
    }

    /// Number of stored nodes.
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges; an undirected edge counts once.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Inserts a node, replacing the stored value if its key already exists.
    ///
    /// Returns `true` when the key was not present before.
    pub fn insert(&mut self, value: V) -> bool {
        let key = self.key_fn.derive(&value);
        match self.nodes.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().value = value;
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(NodeRecord::new(value));
                true
            }
        }
    }

    /// Inserts every value, returning how many new keys were added.
    pub fn insert_all<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = V>,
    {
        values
            .into_iter()
            .map(|value| self.insert(value))
            .filter(|added| *added)
            .count()
    }

    /// Returns whether the key of `value` is stored.
    pub fn contains(&self, value: &V) -> bool {
        self.nodes.contains_key(&self.key_fn.derive(value))
    }

    /// Returns whether the keys of all `values` are stored.
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a V>,
        V: 'a,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Removes a node together with every edge touching it.
    pub fn remove(&mut self, value: &V) -> bool {
        let key = self.key_fn.derive(value);
        let incident: BTreeSet<EdgeId> = match self.nodes.get(&key) {
            Some(record) => record
                .outgoing
                .values()
                .chain(record.incoming.values())
                .copied()
                .collect(),
            None => return false,
        };
        for id in incident {
            self.detach(id);
        }
        self.nodes.remove(&key).is_some()
    }

    /// Connects `source` to `target`.
    ///
    /// Weighted graphs require `Some(weight)` and unweighted graphs require
    /// `None`; a mismatch, or an endpoint that was never inserted, is rejected
    /// without modifying the graph. Connecting a pair that already has an edge
    /// replaces its weight and returns `Ok(false)`.
    pub fn connect(&mut self, source: &V, target: &V, weight: Option<W>) -> Result<bool, GraphError> {
        match (self.config.unweighted, weight.is_some()) {
            (true, true) => {
                return Err(graph_error(
                    "unexpected-weight",
                    "unweighted graphs do not accept edge values",
                ))
            }
            (false, false) => {
                return Err(graph_error(
                    "missing-weight",
                    "weighted graphs require an edge value",
                ))
            }
            _ => {}
        }
        let source = self.known_key(source, "source")?;
        let target = self.known_key(target, "target")?;
        if let Some(id) = self.find_edge(&source, &target) {
            if let Some(record) = self.edges.get_mut(&id) {
                record.value = weight;
            }
            return Ok(false);
        }
        let id = EdgeId::from_raw(self.next_edge);
        self.next_edge += 1;
        self.link(id, &source, &target);
        self.edges.insert(
            id,
            EdgeRecord {
                source,
                target,
                value: weight,
            },
        );
        Ok(true)
    }

    /// Removes the edge between `source` and `target`.
    ///
    /// For undirected graphs either orientation removes the logical edge.
    /// Returns whether an edge existed.
    pub fn disconnect(&mut self, source: &V, target: &V) -> bool {
        let source = self.key_fn.derive(source);
        let target = self.key_fn.derive(target);
        match self.find_edge(&source, &target) {
            Some(id) => self.detach(id).is_some(),
            None => false,
        }
    }

    /// Returns whether an edge `source -> target` exists.
    pub fn has_edge(&self, source: &V, target: &V) -> bool {
        self.find_edge(&self.key_fn.derive(source), &self.key_fn.derive(target))
            .is_some()
    }

    /// Returns whether an edge `source -> target` exists and stores `weight`.
    pub fn has_weighted_edge(&self, source: &V, target: &V, weight: &W) -> bool
    where
        W: PartialEq,
    {
        self.weight_of(source, target)
            .map_or(false, |stored| stored == weight)
    }

    /// Returns the stored weight of `source -> target`, if any.
    pub fn weight_of(&self, source: &V, target: &V) -> Option<&W> {
        let id = self.find_edge(&self.key_fn.derive(source), &self.key_fn.derive(target))?;
        self.edges.get(&id)?.value.as_ref()
    }

    /// Number of distinct edges touching the node.
    pub fn degree_of(&self, value: &V) -> Result<usize, GraphError> {
        let record = self.node(&self.key_fn.derive(value))?;
        if self.config.undirected {
            return Ok(record.outgoing.len());
        }
        let touching: BTreeSet<EdgeId> = record
            .outgoing
            .values()
            .chain(record.incoming.values())
            .copied()
            .collect();
        Ok(touching.len())
    }

    /// Number of edges whose target is the node.
    pub fn in_degree_of(&self, value: &V) -> Result<usize, GraphError> {
        Ok(self.node(&self.key_fn.derive(value))?.incoming.len())
    }

    /// Number of edges whose source is the node.
    pub fn out_degree_of(&self, value: &V) -> Result<usize, GraphError> {
        Ok(self.node(&self.key_fn.derive(value))?.outgoing.len())
    }

    pub(crate) fn find_edge(&self, source: &K, target: &K) -> Option<EdgeId> {
        self.nodes.get(source)?.outgoing.get(target).copied()
    }

    pub(crate) fn edge_records(&self) -> impl Iterator<Item = &EdgeRecord<K, W>> + '_ {
        self.edges.values()
    }

    pub(crate) fn node_entries(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.nodes.iter().map(|(key, record)| (key, &record.value))
    }

    pub(crate) fn value_by_key(&self, key: &K) -> Option<&V> {
        self.nodes.get(key).map(|record| &record.value)
    }

    /// Keys reachable over one edge from `key`; both ways for undirected graphs.
    pub(crate) fn successor_keys<'a>(&'a self, key: &K) -> impl Iterator<Item = &'a K> + 'a {
        self.nodes
            .get(key)
            .into_iter()
            .flat_map(|record| record.outgoing.keys())
    }

    fn node(&self, key: &K) -> Result<&NodeRecord<V, K>, GraphError> {
        self.nodes
            .get(key)
            .ok_or_else(|| graph_error("unknown-node", "node does not exist"))
    }

    fn known_key(&self, value: &V, endpoint: &str) -> Result<K, GraphError> {
        let key = self.key_fn.derive(value);
        if self.nodes.contains_key(&key) {
            Ok(key)
        } else {
            Err(graph_error("unknown-node", "node does not exist")
                .with_context("endpoint", endpoint))
        }
    }

    fn link(&mut self, id: EdgeId, source: &K, target: &K) {
        self.index(id, source, target);
        if self.config.undirected {
            self.index(id, target, source);
        }
    }

    fn index(&mut self, id: EdgeId, source: &K, target: &K) {
        if let Some(record) = self.nodes.get_mut(source) {
            record.outgoing.insert(target.clone(), id);
        }
        if let Some(record) = self.nodes.get_mut(target) {
            record.incoming.insert(source.clone(), id);
        }
    }

    fn unindex(&mut self, source: &K, target: &K) {
        if let Some(record) = self.nodes.get_mut(source) {
            record.outgoing.remove(target);
        }
        if let Some(record) = self.nodes.get_mut(target) {
            record.incoming.remove(source);
        }
    }

    fn detach(&mut self, id: EdgeId) -> Option<EdgeRecord<K, W>> {
        let record = self.edges.remove(&id)?;
        self.unindex(&record.source, &record.target);
        if self.config.undirected {
            self.unindex(&record.target, &record.source);
        }
        Some(record)
    }
}

impl<V, W, K> Graph<V, W, K>
where
    V: Clone,
    W: Clone,
    K: Ord + Clone,
{
    /// Snapshot of all node values in key order.
    pub fn nodes(&self) -> Vec<V> {
        self.nodes.values().map(|record| record.value.clone()).collect()
    }

    /// Snapshot of all edges in creation order; undirected edges appear once.
    pub fn edges(&self) -> Vec<Edge<V, W>> {
        self.edges
            .iter()
            .filter_map(|(id, record)| self.snapshot(&record.source, &record.target, *id))
            .collect()
    }

    /// Edges leaving the node. For undirected graphs this is every edge
    /// touching the node, oriented away from it.
    pub fn outgoing_edges_of(&self, value: &V) -> Result<Vec<Edge<V, W>>, GraphError> {
        let key = self.key_fn.derive(value);
        let record = self.node(&key)?;
        Ok(record
            .outgoing
            .iter()
            .filter_map(|(target, id)| self.snapshot(&key, target, *id))
            .collect())
    }

    /// Edges entering the node. For undirected graphs this mirrors
    /// [`outgoing_edges_of`](Self::outgoing_edges_of) with endpoints swapped.
    pub fn incoming_edges_of(&self, value: &V) -> Result<Vec<Edge<V, W>>, GraphError> {
        let key = self.key_fn.derive(value);
        let record = self.node(&key)?;
        Ok(record
            .incoming
            .iter()
            .filter_map(|(source, id)| self.snapshot(source, &key, *id))
            .collect())
    }

    fn snapshot(&self, source: &K, target: &K, id: EdgeId) -> Option<Edge<V, W>> {
        let record = self.edges.get(&id)?;
        Some(Edge {
            source: self.value_by_key(source)?.clone(),
            target: self.value_by_key(target)?.clone(),
            value: record.value.clone(),
            undirected: self.config.undirected,
        })
    }
}
