use model::base_types::NodeId;
use std::collections::HashMap;

/// A directed edge with a non-negative weight, as read off `graph.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub src: NodeId,
    pub dst: NodeId,
    pub weight: u64,
}

/// Compressed adjacency: each node maps to its successors, sorted by
/// destination id. The sort order is what lets Dijkstra break ties
/// reproducibly on the lowest successor id.
pub struct Adjacency {
    successors: HashMap<NodeId, Vec<(NodeId, u64)>>,
    nodes: Vec<NodeId>,
}

impl Adjacency {
    pub fn build(edges: impl IntoIterator<Item = Edge>) -> Adjacency {
        let mut successors: HashMap<NodeId, Vec<(NodeId, u64)>> = HashMap::new();
        let mut node_set: std::collections::BTreeSet<NodeId> = std::collections::BTreeSet::new();

        for edge in edges {
            node_set.insert(edge.src);
            node_set.insert(edge.dst);
            successors
                .entry(edge.src)
                .or_default()
                .push((edge.dst, edge.weight));
        }

        for succ in successors.values_mut() {
            succ.sort_unstable_by_key(|(dst, _)| *dst);
        }

        Adjacency {
            successors,
            nodes: node_set.into_iter().collect(),
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.binary_search(&node).is_ok()
    }

    /// Successors of `node`, sorted by destination id. Empty slice for
    /// sink nodes or nodes that only ever appear as a destination.
    pub fn successors(&self, node: NodeId) -> &[(NodeId, u64)] {
        self.successors
            .get(&node)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
