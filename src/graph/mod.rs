//! Core graph storage
//!
//! This module implements the attributed graph data model with:
//! - Nodes and edges carrying ordered attribute maps
//! - Directed or undirected interpretation of the edge set
//! - Multiple edges between the same nodes, self-loops allowed
//! - Dense ids with compaction on structural deletion

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStore, Removal};
pub use types::{EdgeId, NodeId};
