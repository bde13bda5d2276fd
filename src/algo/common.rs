//! Shared utilities for structural predicates
//!
//! Provides a read-only, index-based view of the graph topology.

use crate::graph::GraphStore;

/// A dense, integer-indexed view of the graph topology.
///
/// Store ids are already dense, so node index `i` is `NodeId(i)`. The view
/// drops attributes and keeps only what the predicates need.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Whether edges are directed
    pub directed: bool,
    /// Edge endpoints in storage order
    pub endpoints: Vec<(usize, usize)>,
    /// Outgoing edges: index -> vec![target_index]
    pub outgoing: Vec<Vec<usize>>,
    /// Incoming edges: index -> vec![source_index]
    pub incoming: Vec<Vec<usize>>,
}

impl GraphView {
    /// Project the store's topology.
    pub fn new(store: &GraphStore) -> Self {
        let node_count = store.order();
        let mut outgoing = vec![Vec::new(); node_count];
        let mut incoming = vec![Vec::new(); node_count];
        let mut endpoints = Vec::with_capacity(store.size());

        for edge in store.all_edges() {
            let (u, v) = (edge.source.index(), edge.target.index());
            outgoing[u].push(v);
            incoming[v].push(u);
            endpoints.push((u, v));
        }

        Self {
            node_count,
            directed: store.is_directed(),
            endpoints,
            outgoing,
            incoming,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.outgoing[idx].len()
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.incoming[idx].len()
    }

    /// Neighbours ignoring direction
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.outgoing[idx].iter().chain(self.incoming[idx].iter()).copied()
    }
}
