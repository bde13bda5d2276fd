//! Weakly connected components
//!
//! Direction is ignored: two nodes share a component when any chain of
//! edges links them.

use super::common::GraphView;
use rustc_hash::FxHashMap;

/// Result of the component search
#[derive(Debug, Clone)]
pub struct WccResult {
    /// Component index (0-based, ordered by smallest member) for every node
    pub node_component: Vec<usize>,
    /// Number of components
    pub count: usize,
}

/// Union-Find data structure
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]); // Path compression
        }
        self.parent[i]
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Weakly Connected Components (WCC)
pub fn weakly_connected_components(view: &GraphView) -> WccResult {
    let n = view.node_count;
    let mut uf = UnionFind::new(n);

    for &(u, v) in &view.endpoints {
        uf.union(u, v);
    }

    let mut labels: FxHashMap<usize, usize> = FxHashMap::default();
    let mut node_component = Vec::with_capacity(n);
    for i in 0..n {
        let root = uf.find(i);
        let next = labels.len();
        node_component.push(*labels.entry(root).or_insert(next));
    }

    WccResult {
        count: labels.len(),
        node_component,
    }
}

/// Number of weak components. An empty graph has none.
pub fn count_components(view: &GraphView) -> usize {
    weakly_connected_components(view).count
}

/// Weak connectivity. An empty graph is not connected.
pub fn is_connected(view: &GraphView) -> bool {
    count_components(view) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphStore;

    #[test]
    fn test_wcc() {
        let mut store = GraphStore::new(true);

        // Component 1: 0-1
        let n1 = store.create_node();
        let n2 = store.create_node();
        store.create_edge(n1, n2).unwrap();

        // Component 2: 2-3-4, joined against edge direction
        let n3 = store.create_node();
        let n4 = store.create_node();
        let n5 = store.create_node();
        store.create_edge(n3, n4).unwrap();
        store.create_edge(n5, n4).unwrap();

        // Component 3: 5 (isolated)
        store.create_node();

        let result = weakly_connected_components(&GraphView::new(&store));

        assert_eq!(result.count, 3);
        assert_eq!(result.node_component, vec![0, 0, 1, 1, 1, 2]);
    }

    #[test]
    fn test_connectivity_edges() {
        let empty = GraphStore::new(false);
        assert!(!is_connected(&GraphView::new(&empty)));
        assert_eq!(count_components(&GraphView::new(&empty)), 0);

        let mut single = GraphStore::new(false);
        single.create_node();
        assert!(is_connected(&GraphView::new(&single)));
    }
}
