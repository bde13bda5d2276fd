//! Building graphs from tables and JSON
//!
//! Edge endpoints are 0-based positions into the node table. JSON input has
//! the shape `{"nodes": [{..}, ..], "edges": [{"from": 0, "to": 1, ..}, ..],
//! "directed": true}`; `edges` and `directed` may be omitted.

use super::context::ActiveContext;
use super::scope::{self, GraphFrame};
use super::view::{FROM_COLUMN, ROW_ID_COLUMN, TO_COLUMN};
use super::{TableGraph, VerbError, VerbResult};
use crate::config::RelGraphConfig;
use crate::graph::{GraphStore, NodeId, PropertyValue};
use crate::table::{Record, Table};
use serde_json::Value;
use tracing::debug;

impl TableGraph {
    /// Build a graph from a node table and an edge table with `from`/`to`
    /// columns.
    pub fn from_tables(nodes: &Table, edges: &Table, directed: bool) -> VerbResult<Self> {
        Self::from_tables_with_config(nodes, edges, directed, RelGraphConfig::default())
    }

    pub fn from_tables_with_config(
        nodes: &Table,
        edges: &Table,
        directed: bool,
        config: RelGraphConfig,
    ) -> VerbResult<Self> {
        if nodes.has_column(ROW_ID_COLUMN) || edges.has_column(ROW_ID_COLUMN) {
            return Err(VerbError::NamingCollision(ROW_ID_COLUMN.to_string()));
        }
        {
            let _guard = scope::enter(GraphFrame {
                verb: "from_tables",
                active: ActiveContext::Edges,
            });
            edges.require_columns(&[FROM_COLUMN.to_string(), TO_COLUMN.to_string()])?;
        }

        let mut store = GraphStore::new(directed);
        for record in nodes.rows() {
            store.create_node_with_properties(record.cells().clone());
        }
        for record in edges.rows() {
            let source = endpoint(record, FROM_COLUMN)?;
            let target = endpoint(record, TO_COLUMN)?;
            let mut properties = record.cells().clone();
            properties.shift_remove(FROM_COLUMN);
            properties.shift_remove(TO_COLUMN);
            store.create_edge_with_properties(source, target, properties)?;
        }
        store.set_node_columns(nodes.columns().to_vec());
        store.set_edge_columns(
            edges
                .columns()
                .iter()
                .filter(|c| c.as_str() != FROM_COLUMN && c.as_str() != TO_COLUMN)
                .cloned()
                .collect(),
        );

        debug!(
            "Built {} graph with {} nodes and {} edges",
            if directed { "directed" } else { "undirected" },
            store.order(),
            store.size()
        );
        Ok(Self::with_config(store, config))
    }

    /// Build a graph from JSON, directed unless the input says otherwise
    pub fn from_json(value: &Value) -> VerbResult<Self> {
        Self::from_json_with_config(value, RelGraphConfig::default())
    }

    /// Build a graph from JSON; `config.directed` applies when the input
    /// has no `directed` flag.
    pub fn from_json_with_config(value: &Value, config: RelGraphConfig) -> VerbResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            VerbError::UnsupportedInput(format!("expected a graph object, found {}", kind(value)))
        })?;

        let nodes = match object.get("nodes") {
            Some(nodes) => records(nodes, "nodes")?,
            None => {
                return Err(VerbError::UnsupportedInput(
                    "graph object has no 'nodes' array".to_string(),
                ))
            }
        };
        let edges = match object.get("edges") {
            Some(edges) => records(edges, "edges")?,
            None => Table::new(vec![FROM_COLUMN.to_string(), TO_COLUMN.to_string()]),
        };
        let directed = match object.get("directed") {
            None => config.directed,
            Some(Value::Bool(directed)) => *directed,
            Some(other) => {
                return Err(VerbError::UnsupportedInput(format!(
                    "'directed' must be a boolean, found {}",
                    kind(other)
                )))
            }
        };

        Self::from_tables_with_config(&nodes, &edges, directed, config)
    }
}

fn endpoint(record: &Record, column: &str) -> VerbResult<NodeId> {
    match record.get(column) {
        Some(PropertyValue::Integer(position)) if *position >= 0 => {
            Ok(NodeId::new(*position as usize))
        }
        Some(other) => Err(VerbError::UnsupportedInput(format!(
            "edge endpoint '{}' must be a node position, found {}",
            column, other
        ))),
        None => Err(VerbError::UnsupportedInput(format!(
            "edge has no '{}' endpoint",
            column
        ))),
    }
}

fn records(value: &Value, what: &str) -> VerbResult<Table> {
    let items = value.as_array().ok_or_else(|| {
        VerbError::UnsupportedInput(format!("'{}' must be an array, found {}", what, kind(value)))
    })?;

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let fields = item.as_object().ok_or_else(|| {
            VerbError::UnsupportedInput(format!(
                "'{}' entries must be objects, found {}",
                what,
                kind(item)
            ))
        })?;
        let mut record = Record::new();
        for (key, field) in fields {
            let cell = PropertyValue::from_json(field).ok_or_else(|| {
                VerbError::UnsupportedInput(format!("attribute '{}' holds a nested object", key))
            })?;
            record.set(key.clone(), cell);
        }
        rows.push(record);
    }
    Ok(Table::from_rows(rows)?)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphError;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let g = TableGraph::from_json(&json!({
            "nodes": [{"name": "a"}, {"name": "b"}, {"name": "c"}],
            "edges": [{"from": 0, "to": 1, "w": 1.5}, {"from": 1, "to": 2}],
            "directed": false
        }))
        .unwrap();

        assert_eq!(g.store().order(), 3);
        assert_eq!(g.store().size(), 2);
        assert!(!g.store().is_directed());
        let edge = &g.store().all_edges()[1];
        assert_eq!(edge.get_property("w"), Some(&PropertyValue::Null));
        assert!(!edge.has_property("from"));
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        for value in [json!([1, 2]), json!("graph"), json!({"edges": []})] {
            assert!(matches!(
                TableGraph::from_json(&value),
                Err(VerbError::UnsupportedInput(_))
            ));
        }
        let nested = json!({"nodes": [{"meta": {"a": 1}}]});
        assert!(matches!(
            TableGraph::from_json(&nested),
            Err(VerbError::UnsupportedInput(_))
        ));
    }

    #[test]
    fn test_from_json_default_direction() {
        let config = RelGraphConfig {
            directed: false,
            ..RelGraphConfig::default()
        };
        let g = TableGraph::from_json_with_config(&json!({"nodes": [{}]}), config).unwrap();
        assert!(!g.store().is_directed());
        assert_eq!(g.store().order(), 1);
    }

    #[test]
    fn test_from_tables_missing_endpoint_column() {
        let nodes = Table::new(vec!["name".to_string()]);
        let edges = Table::new(vec!["from".to_string()]);
        let err = TableGraph::from_tables(&nodes, &edges, true).unwrap_err();
        assert_eq!(
            err,
            VerbError::MissingColumn {
                column: "to".to_string(),
                table: "edges".to_string(),
            }
        );
    }

    #[test]
    fn test_from_tables_out_of_range_endpoint() {
        let mut node = Record::new();
        node.set("name", "a");
        let mut edge = Record::new();
        edge.set("from", 0i64);
        edge.set("to", 5i64);
        let nodes = Table::from_rows(vec![node]).unwrap();
        let edges = Table::from_rows(vec![edge]).unwrap();

        let err = TableGraph::from_tables(&nodes, &edges, true).unwrap_err();
        assert_eq!(err, VerbError::Graph(GraphError::InvalidEdgeTarget(NodeId::new(5))));
    }
}
