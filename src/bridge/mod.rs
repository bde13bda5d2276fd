//! Graph/table bridge
//!
//! [`TableGraph`] pairs a [`GraphStore`] with an active context and a
//! per-table grouping, and exposes relational verbs over whichever table is
//! active. Every verb leaves the edge set closed over the node set.

pub mod context;
pub mod convert;
pub mod enforce;
pub mod groups;
pub mod scope;
pub mod verbs;
pub mod view;

pub use context::ActiveContext;
pub use groups::{GroupShadowState, GroupState};
pub use verbs::GroupSpec;
pub use view::{FROM_COLUMN, ROW_ID_COLUMN, TO_COLUMN};

use crate::algo::classify;
use crate::config::RelGraphConfig;
use crate::graph::{GraphError, GraphStore};
use crate::table::{Grouping, Record, Table, TableError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Errors raised by graph verbs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerbError {
    #[error("Invalid active context '{0}': expected 'nodes' or 'edges'")]
    InvalidContext(String),

    #[error("Column name '{0}' is reserved for row identity")]
    NamingCollision(String),

    #[error("Column '{column}' not found in {table} table")]
    MissingColumn { column: String, table: String },

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Cannot write {found} rows to the {context} table of {expected} elements")]
    RowCountMismatch {
        context: ActiveContext,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' holds {found} values but is declared {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Table(TableError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

impl From<TableError> for VerbError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::MissingColumn { column, table } => {
                VerbError::MissingColumn { column, table }
            }
            TableError::TypeMismatch {
                column,
                expected,
                found,
            } => VerbError::TypeMismatch {
                column,
                expected,
                found,
            },
            other => VerbError::Table(other),
        }
    }
}

pub type VerbResult<T> = Result<T, VerbError>;

/// A graph addressed as two tables
#[derive(Debug, Clone)]
pub struct TableGraph {
    store: GraphStore,
    active: ActiveContext,
    groups: GroupShadowState,
    config: RelGraphConfig,
}

impl TableGraph {
    /// Create an empty graph
    pub fn new(directed: bool) -> Self {
        Self::from_store(GraphStore::new(directed))
    }

    /// Wrap an existing store, ungrouped, with the default configuration
    pub fn from_store(store: GraphStore) -> Self {
        Self::with_config(store, RelGraphConfig::default())
    }

    pub fn with_config(store: GraphStore, config: RelGraphConfig) -> Self {
        Self {
            store,
            active: config.default_context,
            groups: GroupShadowState::new(),
            config,
        }
    }

    /// Read-only access to the underlying store
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn into_store(self) -> GraphStore {
        self.store
    }

    pub fn config(&self) -> &RelGraphConfig {
        &self.config
    }

    pub fn active(&self) -> ActiveContext {
        self.active
    }

    /// Snapshot of the active table
    pub fn active_table(&self) -> VerbResult<Table> {
        view::read(&self.store, self.active)
    }

    /// Grouping state of both tables
    pub fn group_state(&self) -> GroupState<'_> {
        self.groups.state()
    }

    /// Whether any table retains a grouping
    pub fn is_grouped(&self) -> bool {
        self.groups.is_grouped()
    }

    /// Grouping columns of the active table
    pub fn group_vars(&self) -> Vec<String> {
        self.grouping().vars().to_vec()
    }

    pub fn n_groups(&self) -> usize {
        self.grouping().n_groups()
    }

    /// Row count of every group of the active table
    pub fn group_size(&self) -> Vec<usize> {
        self.grouping().group_sizes()
    }

    /// Row positions of every group of the active table
    pub fn groups(&self) -> Vec<Vec<usize>> {
        self.grouping().groups().to_vec()
    }

    /// Group index of every row of the active table
    pub fn group_indices(&self) -> Vec<usize> {
        self.grouping().indices().to_vec()
    }

    /// One row per group holding its key values
    pub fn group_keys(&self) -> VerbResult<Table> {
        let grouping = self.grouping();
        let rows = grouping
            .keys()
            .iter()
            .map(|key| {
                let mut record = Record::new();
                for (var, value) in grouping.vars().iter().zip(key) {
                    record.set(var.clone(), value.clone());
                }
                record
            })
            .collect();
        Ok(Table::with_schema(grouping.vars().to_vec(), rows)?)
    }

    /// Structural summary
    pub fn describe(&self) -> GraphDescription {
        GraphDescription {
            order: self.store.order(),
            size: self.store.size(),
            shape: classify(&self.store),
        }
    }

    /// Stored grouping of the active table, or a single all-rows group
    fn grouping(&self) -> Cow<'_, Grouping> {
        match self.groups.get(self.active) {
            Some(grouping) => Cow::Borrowed(grouping),
            None => {
                let len = match self.active {
                    ActiveContext::Nodes => self.store.order(),
                    ActiveContext::Edges => self.store.size(),
                };
                Cow::Owned(Grouping::ungrouped(len))
            }
        }
    }
}

impl Default for TableGraph {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Node/edge counts plus the classifier sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub order: usize,
    pub size: usize,
    pub shape: String,
}

impl fmt::Display for GraphDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# A graph: {} nodes and {} edges", self.order, self.size)?;
        writeln!(f, "#")?;
        writeln!(f, "# {}", self.shape)?;
        write!(f, "#")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    #[test]
    fn test_describe_path() {
        let mut store = GraphStore::new(false);
        for _ in 0..3 {
            store.create_node();
        }
        store.create_edge(NodeId::new(0), NodeId::new(1)).unwrap();
        store.create_edge(NodeId::new(1), NodeId::new(2)).unwrap();

        let description = TableGraph::from_store(store).describe();
        assert_eq!(description.order, 3);
        assert_eq!(description.size, 2);
        assert_eq!(
            description.to_string(),
            "# A graph: 3 nodes and 2 edges\n#\n# An unrooted tree\n#"
        );
    }

    #[test]
    fn test_ungrouped_accessors() {
        let mut g = TableGraph::new(true);
        assert_eq!(g.n_groups(), 0);
        assert!(g.group_size().is_empty());

        g.store.create_node();
        g.store.create_node();
        assert_eq!(g.n_groups(), 1);
        assert_eq!(g.group_size(), vec![2]);
        assert_eq!(g.group_indices(), vec![0, 0]);
        assert_eq!(g.group_keys().unwrap().len(), 1);
        assert!(!g.is_grouped());
        assert_eq!(g.group_state(), GroupState::Ungrouped);
    }

    #[test]
    fn test_table_error_mapping() {
        let err: VerbError = TableError::MissingColumn {
            column: "x".to_string(),
            table: "nodes".to_string(),
        }
        .into();
        assert!(matches!(err, VerbError::MissingColumn { .. }));

        let err: VerbError = TableError::UnknownColumn("y".to_string()).into();
        assert!(matches!(err, VerbError::Table(_)));
    }

    #[test]
    fn test_graph_error_mapping() {
        let mut store = GraphStore::new(true);
        let source = store.create_node();
        let err: VerbError = store
            .create_edge(source, NodeId::new(3))
            .unwrap_err()
            .into();
        assert_eq!(err, VerbError::Graph(GraphError::InvalidEdgeTarget(NodeId::new(3))));
        assert_eq!(err.clone().to_string(), err.to_string());
    }
}
