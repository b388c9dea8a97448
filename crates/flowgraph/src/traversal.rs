use std::collections::{BTreeSet, VecDeque};

use crate::graph::Graph;

/// Breadth-first search over stored edges, ignoring edge values.
///
/// Returns every key reachable from `start`, including `start` itself when it
/// is stored.
pub(crate) fn reachable_keys<V, W, K>(graph: &Graph<V, W, K>, start: &K) -> BTreeSet<K>
where
    K: Ord + Clone,
{
    let mut visited = BTreeSet::new();
    if graph.value_by_key(start).is_none() {
        return visited;
    }
    let mut queue = VecDeque::new();
    visited.insert(start.clone());
    queue.push_back(start.clone());
    while let Some(current) = queue.pop_front() {
        for next in graph.successor_keys(&current) {
            if visited.insert(next.clone()) {
                queue.push_back(next.clone());
            }
        }
    }
    visited
}

#[cfg(test)]
mod tests {
    use flowgraph_core::KeyFn;

    use super::*;
    use crate::config::GraphConfig;

    #[test]
    fn directed_reachability_follows_orientation() {
        let mut graph: Graph<char, u32> =
            Graph::new(GraphConfig::directed_weighted(), KeyFn::identity());
        graph.insert_all(['a', 'b', 'c', 'd']);
        graph.connect(&'a', &'b', Some(0)).unwrap();
        graph.connect(&'c', &'b', Some(1)).unwrap();

        let from_a = reachable_keys(&graph, &'a');
        assert_eq!(from_a.into_iter().collect::<Vec<_>>(), vec!['a', 'b']);
        assert_eq!(reachable_keys(&graph, &'b').len(), 1);
        assert!(reachable_keys(&graph, &'z').is_empty());
    }

    #[test]
    fn undirected_reachability_ignores_orientation() {
        let mut graph: Graph<char, u32> =
            Graph::new(GraphConfig::undirected_weighted(), KeyFn::identity());
        graph.insert_all(['a', 'b', 'c', 'd']);
        graph.connect(&'a', &'b', Some(1)).unwrap();
        graph.connect(&'c', &'b', Some(1)).unwrap();

        let from_c = reachable_keys(&graph, &'c');
        assert!(from_c.contains(&'a'));
        assert!(!from_c.contains(&'d'));
    }
}
