//! Human-readable structural description of a graph
//!
//! The wording and the order of the checks are fixed; downstream output
//! is compared against these strings verbatim.

use super::common::GraphView;
use super::community::count_components;
use super::topology::{is_bipartite, is_dag, is_simple};
use crate::graph::GraphStore;
use serde::{Deserialize, Serialize};

/// Structural predicates gathered in one pass over the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphShape {
    pub order: usize,
    pub size: usize,
    pub simple: bool,
    pub directed: bool,
    pub bipartite: bool,
    pub connected: bool,
    pub components: usize,
    pub tree: bool,
    pub forest: bool,
    pub dag: bool,
}

impl GraphShape {
    pub fn of(store: &GraphStore) -> Self {
        let view = GraphView::new(store);
        let order = view.node_count;
        let size = view.edge_count();
        let simple = is_simple(&view);
        let components = count_components(&view);
        let connected = components == 1;

        // |V| - |E| computed in signed space; dense graphs go negative.
        let slack = order as i64 - size as i64;
        let tree = connected && simple && slack == 1;
        let forest = !connected && simple && slack - components as i64 == 0;

        GraphShape {
            order,
            size,
            simple,
            directed: view.directed,
            bipartite: is_bipartite(&view),
            connected,
            components,
            tree,
            forest,
            dag: is_dag(&view),
        }
    }

    /// Render the description, e.g. `"A rooted tree"` or
    /// `"An undirected multigraph with 2 components"`.
    pub fn describe(&self) -> String {
        if self.order == 0 {
            return "An empty graph".to_string();
        }

        let mut desc: Vec<String> = Vec::with_capacity(3);
        if self.tree || self.forest {
            desc.push(if self.directed { "A rooted" } else { "An unrooted" }.to_string());
            desc.push(if self.tree {
                "tree".to_string()
            } else {
                format!("forest with {} trees", self.components)
            });
        } else {
            let qualifier = if self.dag {
                "A directed acyclic"
            } else if self.bipartite {
                "A bipartite"
            } else if self.directed {
                "A directed"
            } else {
                "An undirected"
            };
            desc.push(qualifier.to_string());
            desc.push(if self.simple { "simple graph" } else { "multigraph" }.to_string());
            desc.push(format!(
                "with {} component{}",
                self.components,
                if self.components > 1 { "s" } else { "" }
            ));
        }
        desc.join(" ")
    }
}

/// Classify the store's structure.
pub fn classify(store: &GraphStore) -> String {
    GraphShape::of(store).describe()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    fn build(directed: bool, n: usize, edges: &[(usize, usize)]) -> GraphStore {
        let mut store = GraphStore::new(directed);
        for _ in 0..n {
            store.create_node();
        }
        for &(u, v) in edges {
            store.create_edge(NodeId::new(u), NodeId::new(v)).unwrap();
        }
        store
    }

    #[test]
    fn test_empty() {
        assert_eq!(classify(&GraphStore::new(true)), "An empty graph");
    }

    #[test]
    fn test_trees() {
        let edges = [(0, 1), (0, 2), (2, 3)];
        assert_eq!(classify(&build(true, 4, &edges)), "A rooted tree");
        assert_eq!(classify(&build(false, 4, &edges)), "An unrooted tree");
        assert_eq!(classify(&build(true, 5, &edges)), "A rooted forest with 2 trees");
        assert_eq!(classify(&build(false, 6, &edges)), "An unrooted forest with 3 trees");
    }

    #[test]
    fn test_single_node_is_a_tree() {
        // 1 node, 0 edges: connected, simple, |V|-|E| = 1
        assert_eq!(classify(&build(false, 1, &[])), "An unrooted tree");
    }

    #[test]
    fn test_general_graphs() {
        // Diamond DAG with 4 edges
        let dag = build(true, 4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert_eq!(classify(&dag), "A directed acyclic simple graph with 1 component");

        // Undirected triangle plus an isolated pair
        let tri = build(false, 5, &[(0, 1), (1, 2), (2, 0), (3, 4)]);
        assert_eq!(classify(&tri), "An undirected simple graph with 2 components");

        // Undirected square is bipartite
        let square = build(false, 4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(classify(&square), "A bipartite simple graph with 1 component");

        // Directed cycle with a parallel edge
        let multi = build(true, 3, &[(0, 1), (1, 2), (2, 0), (2, 0)]);
        assert_eq!(classify(&multi), "A directed multigraph with 1 component");
    }

    #[test]
    fn test_shape_fields() {
        let shape = GraphShape::of(&build(true, 4, &[(0, 1), (1, 2), (2, 3)]));
        assert!(shape.tree);
        assert!(!shape.forest);
        assert!(shape.dag);
        assert_eq!(shape.components, 1);
        assert_eq!((shape.order, shape.size), (4, 3));
    }
}
