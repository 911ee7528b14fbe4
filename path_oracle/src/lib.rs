use graph_store::Graph;
use model::base_types::{Distance, NodeId};
use std::cell::RefCell;
use std::collections::HashMap;

/// Thin memoizing facade over `Graph`, keyed by `(u, v)`. Deliberately not
/// `Sync`: the interior `RefCell` cache means a run owns its own oracle
/// rather than coordinating a shared one across threads — cheap to
/// construct, so parallel benchmarking of variants just builds one each.
pub struct PathOracle<'g> {
    graph: &'g Graph,
    distance_cache: RefCell<HashMap<(NodeId, NodeId), Distance>>,
    path_cache: RefCell<HashMap<(NodeId, NodeId), Vec<NodeId>>>,
}

impl<'g> PathOracle<'g> {
    pub fn new(graph: &'g Graph) -> PathOracle<'g> {
        PathOracle {
            graph,
            distance_cache: RefCell::new(HashMap::new()),
            path_cache: RefCell::new(HashMap::new()),
        }
    }

    /// `spd(u, v)`, memoized.
    pub fn spd(&self, u: NodeId, v: NodeId) -> Distance {
        if let Some(d) = self.distance_cache.borrow().get(&(u, v)) {
            return *d;
        }
        let d = self.graph.shortest_path_distance(u, v);
        self.distance_cache.borrow_mut().insert((u, v), d);
        d
    }

    /// `spp(u, v)`, memoized. Also primes the distance cache with the path's
    /// implied length when it was not already known.
    pub fn spp(&self, u: NodeId, v: NodeId) -> Vec<NodeId> {
        if let Some(p) = self.path_cache.borrow().get(&(u, v)) {
            return p.clone();
        }
        let path = self.graph.shortest_path(u, v);
        self.path_cache
            .borrow_mut()
            .insert((u, v), path.clone());
        path
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_store::Edge;

    #[test]
    fn memoizes_repeated_queries() {
        let g = Graph::build([
            Edge {
                src: 1,
                dst: 2,
                weight: 5,
            },
        ]);
        let oracle = PathOracle::new(&g);
        assert_eq!(oracle.spd(1, 2), oracle.spd(1, 2));
        assert_eq!(oracle.spp(1, 2), vec![1, 2]);
    }
}
