//! Tabular projection of graph elements
//!
//! Nodes project to one row per node, edges to one row per edge with two
//! leading `from`/`to` columns holding endpoint positions. Rows are in
//! storage order, so row `i` is the element with id `i`.

use super::context::ActiveContext;
use super::{VerbError, VerbResult};
use crate::graph::{EdgeId, GraphStore, NodeId, PropertyValue};
use crate::table::{Record, Table};

/// Reserved row-identity column added by [`read_indexed`]
pub const ROW_ID_COLUMN: &str = ".graph_row_id";

/// Edge source column
pub const FROM_COLUMN: &str = "from";

/// Edge target column
pub const TO_COLUMN: &str = "to";

/// Project the table for `ctx`.
///
/// The schema is the store's known columns for `ctx` followed by any
/// attribute found on an element but not yet known, so an empty table still
/// carries its columns. Fails with `TypeMismatch` if an attribute holds
/// values of different types across elements.
pub fn read(store: &GraphStore, ctx: ActiveContext) -> VerbResult<Table> {
    let (mut columns, rows): (Vec<String>, Vec<Record>) = match ctx {
        ActiveContext::Nodes => (
            store.node_columns().to_vec(),
            store
                .all_nodes()
                .iter()
                .map(|node| Record::from(node.properties.clone()))
                .collect(),
        ),
        ActiveContext::Edges => {
            let mut columns = vec![FROM_COLUMN.to_string(), TO_COLUMN.to_string()];
            columns.extend(
                store
                    .edge_columns()
                    .iter()
                    .filter(|c| !is_endpoint(c))
                    .cloned(),
            );
            let rows = store
                .all_edges()
                .iter()
                .map(|edge| {
                    let mut record = Record::new();
                    record.set(FROM_COLUMN, edge.source.index() as i64);
                    record.set(TO_COLUMN, edge.target.index() as i64);
                    for (key, value) in &edge.properties {
                        if !is_endpoint(key) {
                            record.set(key.clone(), value.clone());
                        }
                    }
                    record
                })
                .collect();
            (columns, rows)
        }
    };

    for record in &rows {
        for key in record.cells().keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    Ok(Table::with_schema(columns, rows)?)
}

fn is_endpoint(column: &str) -> bool {
    column == FROM_COLUMN || column == TO_COLUMN
}

/// Project the table for `ctx` with the row-identity column appended.
///
/// Fails with `NamingCollision` if an attribute already uses the reserved
/// name. Nothing is modified either way.
pub fn read_indexed(store: &GraphStore, ctx: ActiveContext) -> VerbResult<Table> {
    let table = read(store, ctx)?;
    if table.has_column(ROW_ID_COLUMN) {
        return Err(VerbError::NamingCollision(ROW_ID_COLUMN.to_string()));
    }
    let ids = (0..table.len() as i64).map(PropertyValue::Integer).collect();
    Ok(table.with_column(ROW_ID_COLUMN, ids)?)
}

/// Write a table back as the attributes of `ctx`.
///
/// Row `i` replaces the attributes of element `i`. The row count must match
/// the element count exactly. The reserved index column is dropped, and for
/// edges so are `from`/`to`, which are read-only.
pub fn write(store: &mut GraphStore, ctx: ActiveContext, table: &Table) -> VerbResult<()> {
    let expected = match ctx {
        ActiveContext::Nodes => store.order(),
        ActiveContext::Edges => store.size(),
    };
    if table.len() != expected {
        return Err(VerbError::RowCountMismatch {
            context: ctx,
            expected,
            found: table.len(),
        });
    }

    let attributes = match ctx {
        ActiveContext::Nodes => table.drop_columns(&[ROW_ID_COLUMN]),
        ActiveContext::Edges => table.drop_columns(&[ROW_ID_COLUMN, FROM_COLUMN, TO_COLUMN]),
    };

    let columns = attributes.columns().to_vec();
    for (idx, record) in attributes.into_rows().into_iter().enumerate() {
        let cells = record.into_cells();
        match ctx {
            ActiveContext::Nodes => store.set_node_properties(NodeId::new(idx), cells)?,
            ActiveContext::Edges => store.set_edge_properties(EdgeId::new(idx), cells)?,
        }
    }
    match ctx {
        ActiveContext::Nodes => store.set_node_columns(columns),
        ActiveContext::Edges => store.set_edge_columns(columns),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyMap;

    fn store() -> GraphStore {
        let mut store = GraphStore::new(true);
        for name in ["a", "b", "c"] {
            let mut props = PropertyMap::new();
            props.insert("name".to_string(), name.into());
            store.create_node_with_properties(props);
        }
        let mut props = PropertyMap::new();
        props.insert("weight".to_string(), 2.5.into());
        store
            .create_edge_with_properties(NodeId::new(0), NodeId::new(2), props)
            .unwrap();
        store
    }

    #[test]
    fn test_read_edges_has_endpoints() {
        let table = read(&store(), ActiveContext::Edges).unwrap();
        assert_eq!(
            table.columns(),
            &["from".to_string(), "to".to_string(), "weight".to_string()]
        );
        let row = table.get(0).unwrap();
        assert_eq!(row.get("from"), Some(&PropertyValue::Integer(0)));
        assert_eq!(row.get("to"), Some(&PropertyValue::Integer(2)));
    }

    #[test]
    fn test_read_indexed() {
        let table = read_indexed(&store(), ActiveContext::Nodes).unwrap();
        assert_eq!(table.get(2).unwrap().get(ROW_ID_COLUMN), Some(&PropertyValue::Integer(2)));
    }

    #[test]
    fn test_read_indexed_collision() {
        let mut store = store();
        store
            .get_node_mut(NodeId::new(0))
            .unwrap()
            .set_property(ROW_ID_COLUMN, 7i64);
        let err = read_indexed(&store, ActiveContext::Nodes).unwrap_err();
        assert_eq!(err, VerbError::NamingCollision(ROW_ID_COLUMN.to_string()));
    }

    #[test]
    fn test_write_drops_read_only_columns() {
        let mut store = store();
        let table = read_indexed(&store, ActiveContext::Edges).unwrap();
        write(&mut store, ActiveContext::Edges, &table).unwrap();

        let props = store.edge_properties(EdgeId::new(0)).unwrap();
        assert_eq!(props.len(), 1);
        assert!(props.contains_key("weight"));
    }

    #[test]
    fn test_read_mixed_types() {
        let mut store = store();
        store
            .get_node_mut(NodeId::new(1))
            .unwrap()
            .set_property("name", 4i64);
        let err = read(&store, ActiveContext::Nodes).unwrap_err();
        assert!(matches!(err, VerbError::TypeMismatch { .. }));
    }

    #[test]
    fn test_empty_table_keeps_schema() {
        let mut store = store();
        store.delete_edges(&[EdgeId::new(0)]).unwrap();
        let table = read(&store, ActiveContext::Edges).unwrap();
        assert!(table.is_empty());
        assert_eq!(
            table.columns(),
            &["from".to_string(), "to".to_string(), "weight".to_string()]
        );
    }

    #[test]
    fn test_write_row_count_mismatch() {
        let mut store = store();
        let table = read(&store, ActiveContext::Nodes).unwrap().take(&[0]);
        let err = write(&mut store, ActiveContext::Nodes, &table).unwrap_err();
        assert!(matches!(err, VerbError::RowCountMismatch { expected: 3, found: 1, .. }));
    }
}
