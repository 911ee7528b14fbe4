use graph_store::Graph;
use model::base_types::NodeId;
use model::Rider;
use std::collections::HashMap;

/// The set of nodes within a fixed radius of a driver's committed path,
/// together with each such node's nearest on-path anchor. Built once per
/// driver commitment, so kept intentionally simple: `O(|path| *
/// |corridor|)` rather than a multi-source Dijkstra variant.
pub struct Corridor {
    path_len: usize,
    /// node -> index of its nearest anchor in the committed path.
    anchor_index: HashMap<NodeId, usize>,
}

impl Corridor {
    pub fn build(graph: &Graph, path: &[NodeId], radius: f64) -> Corridor {
        let mut anchor_index: HashMap<NodeId, (usize, f64)> = HashMap::new();

        for (idx, &anchor) in path.iter().enumerate() {
            for (node, dist) in graph.single_source_within(anchor, radius) {
                let dist = dist.value().unwrap_or(f64::INFINITY);
                anchor_index
                    .entry(node)
                    .and_modify(|(best_idx, best_dist)| {
                        if dist < *best_dist || (dist == *best_dist && idx < *best_idx) {
                            *best_idx = idx;
                            *best_dist = dist;
                        }
                    })
                    .or_insert((idx, dist));
            }
        }

        Corridor {
            path_len: path.len(),
            anchor_index: anchor_index.into_iter().map(|(n, (i, _))| (n, i)).collect(),
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.anchor_index.contains_key(&node)
    }

    pub fn anchor_index(&self, node: NodeId) -> Option<usize> {
        self.anchor_index.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.path_len
    }

    pub fn is_empty(&self) -> bool {
        self.path_len == 0
    }

    /// A rider is eligible under the corridor rule iff both endpoints are in
    /// the corridor and the source's anchor does not come after the
    /// destination's anchor along the committed path.
    pub fn eligible(&self, rider: &Rider) -> bool {
        match (
            self.anchor_index(rider.source()),
            self.anchor_index(rider.destination()),
        ) {
            (Some(src_anchor), Some(dst_anchor)) => src_anchor <= dst_anchor,
            _ => false,
        }
    }
}
