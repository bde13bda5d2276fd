//! In-memory graph storage
//!
//! Nodes and edges live in dense arenas indexed by their ids. Structural
//! deletions compact both arenas and renumber the survivors, so ids are
//! always `0..order` and `0..size`.

use super::edge::Edge;
use super::node::Node;
use super::property::PropertyMap;
use super::types::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Counts reported by a structural deletion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    pub nodes: usize,
    pub edges: usize,
}

/// In-memory graph storage
///
/// - nodes: NodeId -> Node
/// - edges: EdgeId -> Edge
/// - outgoing: NodeId -> Vec<EdgeId> (adjacency list for outgoing edges)
/// - incoming: NodeId -> Vec<EdgeId> (adjacency list for incoming edges)
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// Whether edges are interpreted as directed
    directed: bool,

    /// Node storage, position == id
    nodes: Vec<Node>,

    /// Edge storage, position == id
    edges: Vec<Edge>,

    /// Outgoing edges for each node
    outgoing: Vec<Vec<EdgeId>>,

    /// Incoming edges for each node
    incoming: Vec<Vec<EdgeId>>,

    /// Known node attribute names, in first-seen order
    node_columns: Vec<String>,

    /// Known edge attribute names, in first-seen order
    edge_columns: Vec<String>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new(directed: bool) -> Self {
        GraphStore {
            directed,
            nodes: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            node_columns: Vec::new(),
            edge_columns: Vec::new(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Create a node without attributes
    pub fn create_node(&mut self) -> NodeId {
        self.create_node_with_properties(PropertyMap::new())
    }

    /// Create a node with attributes
    pub fn create_node_with_properties(&mut self, properties: PropertyMap) -> NodeId {
        let node_id = NodeId::new(self.nodes.len());
        extend_columns(&mut self.node_columns, &properties);
        self.nodes.push(Node::new_with_properties(node_id, properties));
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        node_id
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Get the attribute map of a node
    pub fn node_properties(&self, id: NodeId) -> GraphResult<&PropertyMap> {
        self.get_node(id)
            .map(|n| &n.properties)
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// Replace the whole attribute map of a node
    pub fn set_node_properties(&mut self, id: NodeId, properties: PropertyMap) -> GraphResult<()> {
        let node = self.get_node_mut(id).ok_or(GraphError::NodeNotFound(id))?;
        node.properties = properties;
        Ok(())
    }

    /// Create an edge between two nodes
    pub fn create_edge(&mut self, source: NodeId, target: NodeId) -> GraphResult<EdgeId> {
        self.create_edge_with_properties(source, target, PropertyMap::new())
    }

    /// Create an edge with attributes
    pub fn create_edge_with_properties(
        &mut self,
        source: NodeId,
        target: NodeId,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId> {
        // Validate nodes exist
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        let edge_id = EdgeId::new(self.edges.len());
        extend_columns(&mut self.edge_columns, &properties);
        self.outgoing[source.index()].push(edge_id);
        self.incoming[target.index()].push(edge_id);
        self.edges.push(Edge::new_with_properties(edge_id, source, target, properties));
        Ok(edge_id)
    }

    /// Get an edge by ID
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Get a mutable edge by ID
    pub fn get_edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index())
    }

    /// Check if an edge exists
    pub fn has_edge(&self, id: EdgeId) -> bool {
        id.index() < self.edges.len()
    }

    /// Get the attribute map of an edge
    pub fn edge_properties(&self, id: EdgeId) -> GraphResult<&PropertyMap> {
        self.get_edge(id)
            .map(|e| &e.properties)
            .ok_or(GraphError::EdgeNotFound(id))
    }

    /// Replace the whole attribute map of an edge. Endpoints are untouched.
    pub fn set_edge_properties(&mut self, id: EdgeId, properties: PropertyMap) -> GraphResult<()> {
        let edge = self.get_edge_mut(id).ok_or(GraphError::EdgeNotFound(id))?;
        edge.properties = properties;
        Ok(())
    }

    /// Node attribute names known to the store.
    ///
    /// Survives deletion of every node, so an emptied table keeps its schema.
    pub fn node_columns(&self) -> &[String] {
        &self.node_columns
    }

    pub fn edge_columns(&self) -> &[String] {
        &self.edge_columns
    }

    /// Replace the node schema after a whole-table attribute write
    pub fn set_node_columns(&mut self, columns: Vec<String>) {
        self.node_columns = columns;
    }

    /// Replace the edge schema after a whole-table attribute write
    pub fn set_edge_columns(&mut self, columns: Vec<String>) {
        self.edge_columns = columns;
    }

    /// Get all outgoing edges from a node
    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.outgoing
            .get(node_id.index())
            .map(|edge_ids| edge_ids.iter().filter_map(|&id| self.get_edge(id)).collect())
            .unwrap_or_default()
    }

    /// Get all incoming edges to a node
    pub fn get_incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.incoming
            .get(node_id.index())
            .map(|edge_ids| edge_ids.iter().filter_map(|&id| self.get_edge(id)).collect())
            .unwrap_or_default()
    }

    pub fn out_degree(&self, node_id: NodeId) -> usize {
        self.outgoing.get(node_id.index()).map_or(0, Vec::len)
    }

    pub fn in_degree(&self, node_id: NodeId) -> usize {
        self.incoming.get(node_id.index()).map_or(0, Vec::len)
    }

    /// Total degree; a self-loop counts twice.
    pub fn degree(&self, node_id: NodeId) -> usize {
        self.out_degree(node_id) + self.in_degree(node_id)
    }

    /// Number of nodes
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in storage order
    pub fn all_nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in storage order
    pub fn all_edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Delete nodes and every edge incident to them.
    ///
    /// All ids are checked before anything is removed. Survivors are
    /// renumbered in their original relative order and edge endpoints are
    /// remapped to the new node ids.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> GraphResult<Removal> {
        let mut doomed = vec![false; self.nodes.len()];
        for &id in ids {
            if !self.has_node(id) {
                return Err(GraphError::NodeNotFound(id));
            }
            doomed[id.index()] = true;
        }

        let mut remap = vec![None; self.nodes.len()];
        let mut next = 0;
        for (old, gone) in doomed.iter().enumerate() {
            if !gone {
                remap[old] = Some(NodeId::new(next));
                next += 1;
            }
        }

        let before_nodes = self.nodes.len();
        let before_edges = self.edges.len();

        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_iter()
            .filter_map(|mut node| {
                remap[node.id.index()].map(|new_id| {
                    node.id = new_id;
                    node
                })
            })
            .collect();

        let edges = std::mem::take(&mut self.edges);
        self.edges = edges
            .into_iter()
            .filter_map(|mut edge| {
                match (remap[edge.source.index()], remap[edge.target.index()]) {
                    (Some(source), Some(target)) => {
                        edge.source = source;
                        edge.target = target;
                        Some(edge)
                    }
                    _ => {
                        trace!("Cascading removal of edge {}", edge.id);
                        None
                    }
                }
            })
            .collect();

        self.reindex();

        let removal = Removal {
            nodes: before_nodes - self.nodes.len(),
            edges: before_edges - self.edges.len(),
        };
        debug!(
            "Deleted {} nodes, cascaded {} edges",
            removal.nodes, removal.edges
        );
        Ok(removal)
    }

    /// Delete edges. Nodes are never affected.
    pub fn delete_edges(&mut self, ids: &[EdgeId]) -> GraphResult<Removal> {
        let mut doomed = vec![false; self.edges.len()];
        for &id in ids {
            if !self.has_edge(id) {
                return Err(GraphError::EdgeNotFound(id));
            }
            doomed[id.index()] = true;
        }

        let before = self.edges.len();
        let edges = std::mem::take(&mut self.edges);
        self.edges = edges
            .into_iter()
            .filter(|edge| !doomed[edge.id.index()])
            .collect();
        self.reindex();

        let removal = Removal {
            nodes: 0,
            edges: before - self.edges.len(),
        };
        debug!("Deleted {} edges", removal.edges);
        Ok(removal)
    }

    /// Return the first edge whose endpoints do not reference a node, if any.
    pub fn find_dangling_edge(&self) -> Option<EdgeId> {
        self.edges
            .iter()
            .find(|e| !self.has_node(e.source) || !self.has_node(e.target))
            .map(|e| e.id)
    }

    /// Renumber edges densely and rebuild adjacency lists.
    fn reindex(&mut self) {
        self.outgoing = vec![Vec::new(); self.nodes.len()];
        self.incoming = vec![Vec::new(); self.nodes.len()];
        for (idx, edge) in self.edges.iter_mut().enumerate() {
            edge.id = EdgeId::new(idx);
            self.outgoing[edge.source.index()].push(edge.id);
            self.incoming[edge.target.index()].push(edge.id);
        }
    }
}

fn extend_columns(columns: &mut Vec<String>, properties: &PropertyMap) {
    for key in properties.keys() {
        if !columns.contains(key) {
            columns.push(key.clone());
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(true)
    }
}
