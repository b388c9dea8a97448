//! Edmonds-Karp maximum flow over weighted graphs.
//!
//! Edge values are read as capacities. The solver never mutates its input; the
//! realised flow is returned as a fresh graph with the same modes and key
//! function.

use std::collections::{BTreeMap, VecDeque};
use std::fmt::Debug;
use std::ops::{Add, Sub};

use flowgraph_core::errors::{ErrorInfo, GraphError};
use log::{debug, trace};

use crate::graph::Graph;
use crate::traversal::reachable_keys;

/// Numeric edge value usable as a flow capacity.
pub trait Capacity: Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + Debug {
    /// Additive identity.
    fn zero() -> Self;

    /// Addition clamped to the largest representable value.
    fn saturating_add(self, rhs: Self) -> Self;

    /// Addition returning `None` when the sum is not representable.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_integer_capacity {
    ($($ty:ty),*) => {
        $(
            impl Capacity for $ty {
                fn zero() -> Self {
                    0
                }

                fn saturating_add(self, rhs: Self) -> Self {
                    <$ty>::saturating_add(self, rhs)
                }

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_add(self, rhs)
                }
            }
        )*
    };
}

macro_rules! impl_float_capacity {
    ($($ty:ty),*) => {
        $(
            impl Capacity for $ty {
                fn zero() -> Self {
                    0.0
                }

                fn saturating_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }
            }
        )*
    };
}

impl_integer_capacity!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_float_capacity!(f32, f64);

/// Result of a successful maximum flow computation.
#[derive(Debug, Clone)]
pub struct MaxFlow<V, W, K> {
    /// Total flow leaving the source.
    pub flow: W,
    /// Every input node plus one edge per input edge carrying non-zero flow.
    pub flow_graph: Graph<V, W, K>,
}

/// Computes the maximum flow from `source` to `sink`.
///
/// Returns `Ok(None)` when either endpoint is missing or when `sink` cannot be
/// reached from `source` over the stored edges, whatever their capacities. A
/// reachable sink always yields `Ok(Some(..))`, possibly with zero flow, and
/// `source == sink` yields zero flow. Unweighted graphs are rejected, and a
/// total flow that does not fit in `W` fails with `flow-overflow`.
pub fn find_max_flow<V, W, K>(
    graph: &Graph<V, W, K>,
    source: &V,
    sink: &V,
) -> Result<Option<MaxFlow<V, W, K>>, GraphError>
where
    V: Clone,
    W: Capacity,
    K: Ord + Clone,
{
    if graph.is_unweighted() {
        return Err(GraphError::Flow(
            ErrorInfo::new("unweighted-graph", "maximum flow requires edge capacities")
                .with_hint("build the graph in weighted mode"),
        ));
    }
    debug!(
        "max flow requested over {} nodes and {} edges",
        graph.count(),
        graph.edge_count()
    );
    let source_key = graph.key_of(source);
    let sink_key = graph.key_of(sink);
    if graph.value_by_key(&source_key).is_none() || graph.value_by_key(&sink_key).is_none() {
        debug!("max flow requested between nodes that are not stored");
        return Ok(None);
    }

    let mut flow_graph = graph.empty_like();
    let mut positions: BTreeMap<K, usize> = BTreeMap::new();
    let mut values: Vec<&V> = Vec::with_capacity(graph.count());
    for (position, (key, value)) in graph.node_entries().enumerate() {
        positions.insert(key.clone(), position);
        values.push(value);
        flow_graph.insert(value.clone());
    }

    if source_key == sink_key {
        return Ok(Some(MaxFlow {
            flow: W::zero(),
            flow_graph,
        }));
    }
    if !reachable_keys(graph, &source_key).contains(&sink_key) {
        debug!("sink is unreachable from source; no flow network exists");
        return Ok(None);
    }
    let (Some(&s), Some(&t)) = (positions.get(&source_key), positions.get(&sink_key)) else {
        return Ok(None);
    };

    let mut network = ResidualNetwork::new(values.len());
    for record in graph.edge_records() {
        if record.source == record.target {
            continue;
        }
        if let (Some(&tail), Some(&head), Some(capacity)) = (
            positions.get(&record.source),
            positions.get(&record.target),
            record.value,
        ) {
            network.add_edge(tail, head, capacity, graph.is_undirected());
        }
    }
    debug!(
        "computing max flow over {} nodes and {} residual edges",
        values.len(),
        network.edges.len()
    );

    let mut flow = W::zero();
    let mut augmentations = 0usize;
    while let Some(path) = network.augmenting_path(s, t) {
        let pushed = network.augment(&path);
        trace!("augmenting path of {} edges carries {pushed:?}", path.len());
        flow = flow.checked_add(pushed).ok_or_else(|| {
            GraphError::Flow(
                ErrorInfo::new("flow-overflow", "maximum flow exceeds the capacity type")
                    .with_context("flow", format!("{flow:?}"))
                    .with_hint("use a wider capacity type"),
            )
        })?;
        augmentations += 1;
    }
    debug!("max flow {flow:?} after {augmentations} augmentations");

    for edge in &network.edges {
        if edge.forward > W::zero() {
            flow_graph.connect(values[edge.tail], values[edge.head], Some(edge.forward))?;
        }
        if edge.backward > W::zero() {
            flow_graph.connect(values[edge.head], values[edge.tail], Some(edge.backward))?;
        }
    }

    Ok(Some(MaxFlow { flow, flow_graph }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Along the stored orientation, tail to head.
    Forward,
    /// Against the stored orientation, head to tail.
    Backward,
}

/// Residual bookkeeping for one input edge.
///
/// `forward` and `backward` hold the flow currently running each way; pushing
/// against an existing flow cancels it before adding new flow, so at most one
/// of them is non-zero. Directed edges have no backward capacity, which makes
/// their backward residual exactly the flow that can be cancelled.
///
/// An undirected residual can reach twice the capacity, so it saturates at the
/// largest value of `W`. The path bottleneck stays a valid push either way.
#[derive(Debug, Clone)]
struct ResidualEdge<W> {
    tail: usize,
    head: usize,
    forward_capacity: W,
    backward_capacity: W,
    forward: W,
    backward: W,
}

impl<W: Capacity> ResidualEdge<W> {
    fn new(tail: usize, head: usize, capacity: W, undirected: bool) -> Self {
        let capacity = if capacity < W::zero() {
            W::zero()
        } else {
            capacity
        };
        Self {
            tail,
            head,
            forward_capacity: capacity,
            backward_capacity: if undirected { capacity } else { W::zero() },
            forward: W::zero(),
            backward: W::zero(),
        }
    }

    fn endpoints(&self, direction: Direction) -> (usize, usize) {
        match direction {
            Direction::Forward => (self.tail, self.head),
            Direction::Backward => (self.head, self.tail),
        }
    }

    fn residual(&self, direction: Direction) -> W {
        match direction {
            Direction::Forward => {
                (self.forward_capacity - self.forward).saturating_add(self.backward)
            }
            Direction::Backward => {
                (self.backward_capacity - self.backward).saturating_add(self.forward)
            }
        }
    }

    fn push(&mut self, direction: Direction, amount: W) {
        let (same, opposite) = match direction {
            Direction::Forward => (&mut self.forward, &mut self.backward),
            Direction::Backward => (&mut self.backward, &mut self.forward),
        };
        let cancelled = smaller(amount, *opposite);
        *opposite = *opposite - cancelled;
        *same = *same + (amount - cancelled);
    }
}

#[derive(Debug)]
struct ResidualNetwork<W> {
    edges: Vec<ResidualEdge<W>>,
    adjacency: Vec<Vec<(usize, Direction)>>,
}

impl<W: Capacity> ResidualNetwork<W> {
    fn new(node_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); node_count],
        }
    }

    fn add_edge(&mut self, tail: usize, head: usize, capacity: W, undirected: bool) {
        let index = self.edges.len();
        self.edges
            .push(ResidualEdge::new(tail, head, capacity, undirected));
        self.adjacency[tail].push((index, Direction::Forward));
        self.adjacency[head].push((index, Direction::Backward));
    }

    /// Shortest source-to-sink path over positive residual capacity.
    fn augmenting_path(&self, source: usize, sink: usize) -> Option<Vec<(usize, Direction)>> {
        let mut parent: Vec<Option<(usize, Direction)>> = vec![None; self.adjacency.len()];
        let mut visited = vec![false; self.adjacency.len()];
        let mut queue = VecDeque::new();
        visited[source] = true;
        queue.push_back(source);
        while let Some(node) = queue.pop_front() {
            if node == sink {
                break;
            }
            for &(edge, direction) in &self.adjacency[node] {
                let (_, next) = self.edges[edge].endpoints(direction);
                if !visited[next] && self.edges[edge].residual(direction) > W::zero() {
                    visited[next] = true;
                    parent[next] = Some((edge, direction));
                    queue.push_back(next);
                }
            }
        }
        if !visited[sink] {
            return None;
        }

        let mut path = Vec::new();
        let mut current = sink;
        while current != source {
            let (edge, direction) = parent[current]?;
            path.push((edge, direction));
            current = self.edges[edge].endpoints(direction).0;
        }
        path.reverse();
        Some(path)
    }

    /// Pushes the path's bottleneck along every edge and returns it.
    fn augment(&mut self, path: &[(usize, Direction)]) -> W {
        let mut bottleneck: Option<W> = None;
        for &(edge, direction) in path {
            let residual = self.edges[edge].residual(direction);
            bottleneck = Some(bottleneck.map_or(residual, |current| smaller(current, residual)));
        }
        let Some(amount) = bottleneck else {
            return W::zero();
        };
        for &(edge, direction) in path {
            self.edges[edge].push(direction, amount);
        }
        amount
    }
}

fn smaller<W: PartialOrd>(a: W, b: W) -> W {
    if b < a {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushing_against_flow_cancels_before_adding() {
        let mut edge = ResidualEdge::new(0, 1, 5u32, true);
        edge.push(Direction::Forward, 3);
        assert_eq!(edge.residual(Direction::Forward), 2);
        assert_eq!(edge.residual(Direction::Backward), 8);

        edge.push(Direction::Backward, 4);
        assert_eq!(edge.forward, 0);
        assert_eq!(edge.backward, 1);
        assert_eq!(edge.residual(Direction::Forward), 6);
    }

    #[test]
    fn directed_backward_residual_is_the_cancellable_flow() {
        let mut edge = ResidualEdge::new(0, 1, 4u64, false);
        assert_eq!(edge.residual(Direction::Backward), 0);
        edge.push(Direction::Forward, 4);
        assert_eq!(edge.residual(Direction::Forward), 0);
        assert_eq!(edge.residual(Direction::Backward), 4);
    }

    #[test]
    fn undirected_residual_saturates() {
        let mut edge = ResidualEdge::new(0, 1, 200u8, true);
        edge.push(Direction::Forward, 200);
        assert_eq!(edge.residual(Direction::Forward), 0);
        assert_eq!(edge.residual(Direction::Backward), u8::MAX);

        edge.push(Direction::Backward, u8::MAX);
        assert_eq!(edge.forward, 0);
        assert_eq!(edge.backward, 55);
    }

    #[test]
    fn negative_capacity_is_clamped() {
        let edge = ResidualEdge::new(0, 1, -3i32, false);
        assert_eq!(edge.residual(Direction::Forward), 0);
    }

    #[test]
    fn network_saturates_diamond_with_cross_edge() {
        let mut network = ResidualNetwork::new(4);
        network.add_edge(0, 1, 1u32, false);
        network.add_edge(0, 2, 1, false);
        network.add_edge(1, 2, 1, false);
        network.add_edge(1, 3, 1, false);
        network.add_edge(2, 3, 1, false);

        let mut total = 0;
        while let Some(path) = network.augmenting_path(0, 3) {
            total += network.augment(&path);
        }
        assert_eq!(total, 2);
        assert!(network.augmenting_path(0, 3).is_none());
    }
}
