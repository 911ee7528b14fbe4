pub mod adjacency;
pub mod dijkstra;

pub use adjacency::Edge;

use adjacency::Adjacency;
use model::base_types::{Distance, NodeId};
use std::collections::HashMap;

/// Immutable weighted directed graph, built once from an edge list and
/// shared by read-only reference across every component downstream.
/// Answers shortest-path queries with a fresh Dijkstra run per call; the
/// `path_oracle` crate is the memoizing layer that sits in front of it.
pub struct Graph {
    adjacency: Adjacency,
}

impl Graph {
    pub fn build(edges: impl IntoIterator<Item = Edge>) -> Graph {
        let adjacency = Adjacency::build(edges);
        tracing::info!(
            nodes = adjacency.nodes().count(),
            "graph store built"
        );
        Graph { adjacency }
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.nodes()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_node(node)
    }

    /// `spd(u, v)`: shortest-path distance, or `Distance::Infinity` if `v`
    /// is unreachable from `u` (including when `u` or `v` is absent from
    /// the graph).
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn shortest_path_distance(&self, u: NodeId, v: NodeId) -> Distance {
        if u == v {
            return Distance::ZERO;
        }
        let sp = dijkstra::dijkstra(&self.adjacency, u, None);
        match sp.distance.get(&v) {
            Some(d) => Distance::from_weight(*d),
            None => {
                tracing::trace!(u, v, "pair unreachable");
                Distance::Infinity
            }
        }
    }

    /// `spp(u, v)`: the node sequence of a shortest path, or an empty vector
    /// if `v` is unreachable from `u`. Ties are broken deterministically by
    /// lowest successor id.
    pub fn shortest_path(&self, u: NodeId, v: NodeId) -> Vec<NodeId> {
        if u == v {
            return vec![u];
        }
        let sp = dijkstra::dijkstra(&self.adjacency, u, None);
        sp.path_to(u, v).unwrap_or_default()
    }

    /// All nodes reachable from `u` within `cutoff`, mapped to their distance
    /// from `u`. Used to build a driver's corridor.
    pub fn single_source_within(&self, u: NodeId, cutoff: f64) -> HashMap<NodeId, Distance> {
        let cutoff_weight = cutoff.max(0.0).floor() as u64;
        let sp = dijkstra::dijkstra(&self.adjacency, u, Some(cutoff_weight));
        sp.distance
            .into_iter()
            .map(|(node, d)| (node, Distance::from_weight(d)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::base_types::Distance;

    fn triangle() -> Graph {
        Graph::build([
            Edge {
                src: 1,
                dst: 2,
                weight: 1,
            },
            Edge {
                src: 2,
                dst: 3,
                weight: 1,
            },
            Edge {
                src: 1,
                dst: 3,
                weight: 10,
            },
        ])
    }

    #[test]
    fn shortest_path_prefers_cheaper_route() {
        let g = triangle();
        assert_eq!(g.shortest_path_distance(1, 3), Distance::Finite(2.0));
        assert_eq!(g.shortest_path(1, 3), vec![1, 2, 3]);
    }

    #[test]
    fn unreachable_pair_is_infinite_and_empty() {
        let g = triangle();
        assert_eq!(g.shortest_path_distance(3, 1), Distance::Infinity);
        assert!(g.shortest_path(3, 1).is_empty());
    }

    #[test]
    fn single_source_within_respects_cutoff() {
        let g = triangle();
        let within = g.single_source_within(1, 1.5);
        assert!(within.contains_key(&1));
        assert!(within.contains_key(&2));
        assert!(!within.contains_key(&3));
    }

    #[test]
    fn same_node_distance_is_zero() {
        let g = triangle();
        assert_eq!(g.shortest_path_distance(2, 2), Distance::ZERO);
        assert_eq!(g.shortest_path(2, 2), vec![2]);
    }
}
