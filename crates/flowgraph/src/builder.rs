use std::marker::PhantomData;

use flowgraph_core::KeyFn;

use crate::config::GraphConfig;
use crate::graph::Graph;

/// Fluent construction of a [`Graph`].
///
/// Key derivation, orientation and weight mode are chosen here once; the
/// resulting graph cannot change them.
///
/// ```
/// use flowgraph::{Graph, GraphBuilder};
///
/// let mut graph: Graph<&str, u32> = GraphBuilder::new().undirected().weighted().build();
/// graph.insert_all(["a", "b"]);
/// graph.connect(&"a", &"b", Some(3)).unwrap();
/// assert!(graph.has_edge(&"b", &"a"));
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder<V, W, K> {
    config: GraphConfig,
    key_fn: KeyFn<V, K>,
    _weight: PhantomData<fn() -> W>,
}

impl<V, W> GraphBuilder<V, W, V>
where
    V: Clone + 'static,
{
    /// Starts a builder where every value is its own key.
    pub fn new() -> Self {
        Self::with_key_fn(KeyFn::identity())
    }
}

impl<V, W> Default for GraphBuilder<V, W, V>
where
    V: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, W, K> GraphBuilder<V, W, K> {
    /// Starts a builder deriving keys with `f`.
    pub fn with_key<F>(f: F) -> Self
    where
        F: Fn(&V) -> K + Send + Sync + 'static,
    {
        Self::with_key_fn(KeyFn::new(f))
    }

    /// Starts a builder from an existing key function.
    pub fn with_key_fn(key_fn: KeyFn<V, K>) -> Self {
        Self {
            config: GraphConfig::default(),
            key_fn,
            _weight: PhantomData,
        }
    }

    /// Replaces the key-derivation strategy.
    pub fn key_fn<K2, F>(self, f: F) -> GraphBuilder<V, W, K2>
    where
        F: Fn(&V) -> K2 + Send + Sync + 'static,
    {
        GraphBuilder {
            config: self.config,
            key_fn: KeyFn::new(f),
            _weight: PhantomData,
        }
    }

    /// Edges connect source to target only.
    pub fn directed(mut self) -> Self {
        self.config.undirected = false;
        self
    }

    /// Edges are logical bidirectional connections.
    pub fn undirected(mut self) -> Self {
        self.config.undirected = true;
        self
    }

    /// Edges must carry a value.
    pub fn weighted(mut self) -> Self {
        self.config.unweighted = false;
        self
    }

    /// Edges carry no value.
    pub fn unweighted(mut self) -> Self {
        self.config.unweighted = true;
        self
    }

    /// Applies both mode flags at once.
    pub fn config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    /// Produces the empty graph.
    pub fn build(self) -> Graph<V, W, K>
    where
        K: Ord + Clone,
    {
        Graph::new(self.config, self.key_fn)
    }
}

impl<V, W> Graph<V, W, V>
where
    V: Clone + 'static,
{
    /// Shortcut for [`GraphBuilder::new`].
    pub fn builder() -> GraphBuilder<V, W, V> {
        GraphBuilder::new()
    }
}
