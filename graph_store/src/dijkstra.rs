use crate::adjacency::Adjacency;
use model::base_types::NodeId;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Min-heap entry ordered by `(distance, node)` so that among nodes tied on
/// distance the lowest id is popped first. Combined with relaxing edges in
/// ascending successor order, this makes the predecessor tree reproducible.
#[derive(Copy, Clone, PartialEq, Eq)]
struct HeapEntry {
    distance: u64,
    node: NodeId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a single-source Dijkstra run: finite distance plus the
/// predecessor used to reach each node, keyed by node id. Nodes absent from
/// the map are unreachable from the source.
pub struct ShortestPaths {
    pub distance: HashMap<NodeId, u64>,
    pub predecessor: HashMap<NodeId, NodeId>,
}

impl ShortestPaths {
    /// Reconstructs the node sequence from `source` to `target`, or `None`
    /// if `target` was not reached.
    pub fn path_to(&self, source: NodeId, target: NodeId) -> Option<Vec<NodeId>> {
        if source == target {
            return self.distance.get(&target).map(|_| vec![source]).or(Some(vec![source]));
        }
        if !self.distance.contains_key(&target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while current != source {
            current = *self.predecessor.get(&current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra from `source` over `adjacency`, optionally stopping once all
/// frontier distances exceed `cutoff` (used by `single_source_within`).
pub fn dijkstra(adjacency: &Adjacency, source: NodeId, cutoff: Option<u64>) -> ShortestPaths {
    let mut distance: HashMap<NodeId, u64> = HashMap::new();
    let mut predecessor: HashMap<NodeId, NodeId> = HashMap::new();
    let mut heap = BinaryHeap::new();

    distance.insert(source, 0);
    heap.push(HeapEntry {
        distance: 0,
        node: source,
    });

    while let Some(HeapEntry { distance: d, node }) = heap.pop() {
        if let Some(cutoff) = cutoff {
            if d > cutoff {
                break;
            }
        }
        if d > *distance.get(&node).unwrap_or(&u64::MAX) {
            continue; // stale heap entry
        }

        for &(succ, weight) in adjacency.successors(node) {
            let candidate = d + weight;
            if let Some(cutoff) = cutoff {
                if candidate > cutoff {
                    continue;
                }
            }
            let improves = distance
                .get(&succ)
                .map(|&best| candidate < best)
                .unwrap_or(true);
            if improves {
                distance.insert(succ, candidate);
                predecessor.insert(succ, node);
                heap.push(HeapEntry {
                    distance: candidate,
                    node: succ,
                });
            }
        }
    }

    ShortestPaths {
        distance,
        predecessor,
    }
}
