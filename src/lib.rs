//! relgraph
//!
//! Relational verbs over an in-memory property graph. A graph is addressed
//! as two tables, one row per node and one row per edge, and table
//! operations (grouping, first-wins deduplication) are translated into
//! structural graph changes that never leave an edge pointing at a missing
//! node.
//!
//! # Layout
//!
//! - `graph`: node/edge storage with compacting deletions
//! - `algo`: structural predicates and the graph classifier
//! - `table`: the relational engine (records, grouping, distinct)
//! - `bridge`: active context, table views, per-table grouping, verbs
//! - `config`: YAML-backed runtime configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use relgraph::{ActiveContext, GroupSpec, TableGraph};
//! use serde_json::json;
//!
//! let mut g = TableGraph::from_json(&json!({
//!     "nodes": [{"kind": "a"}, {"kind": "b"}, {"kind": "a"}],
//!     "edges": [{"from": 0, "to": 1}, {"from": 1, "to": 2}],
//!     "directed": false
//! }))
//! .unwrap();
//!
//! g.group_by(GroupSpec::by(["kind"])).unwrap();
//! assert_eq!(g.n_groups(), 2);
//!
//! // Dropping the duplicate "a" node takes its edge with it
//! g.distinct(&["kind"], true).unwrap();
//! assert_eq!(g.store().order(), 2);
//! assert_eq!(g.store().size(), 1);
//!
//! g.activate(ActiveContext::Edges);
//! assert_eq!(g.active_table().unwrap().len(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod bridge;
pub mod config;
pub mod graph;
pub mod table;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, GraphError, GraphResult, GraphStore, Node, NodeId, PropertyMap, PropertyValue,
};

pub use algo::{classify, GraphShape};

pub use table::{Grouping, Record, Table, TableError, TableResult};

pub use bridge::{
    ActiveContext, GraphDescription, GroupShadowState, GroupSpec, GroupState, TableGraph,
    VerbError, VerbResult, ROW_ID_COLUMN,
};

pub use config::{ConfigError, DistinctGrouping, RelGraphConfig};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
