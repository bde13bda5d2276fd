//! Relational verbs on a graph
//!
//! Every verb runs inside a scoped graph frame, validates against a
//! snapshot of the active table, and only then mutates the store. A verb
//! that returns an error has changed nothing.

use super::context::ActiveContext;
use super::scope::{self, GraphFrame};
use super::view::{self, FROM_COLUMN, ROW_ID_COLUMN, TO_COLUMN};
use super::{enforce, TableGraph, VerbError, VerbResult};
use crate::config::DistinctGrouping;
use crate::table;
use tracing::{debug, info};

/// Columns to group by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSpec {
    /// Grouping columns; empty means every column of the table
    pub columns: Vec<String>,

    /// Extend the existing grouping instead of replacing it
    pub add: bool,
}

impl GroupSpec {
    /// Group by every column
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            add: false,
        }
    }

    /// Add to the existing grouping
    pub fn adding(mut self) -> Self {
        self.add = true;
        self
    }
}

impl From<&[&str]> for GroupSpec {
    fn from(columns: &[&str]) -> Self {
        GroupSpec::by(columns.iter().copied())
    }
}

impl TableGraph {
    /// Make `ctx` the table subsequent verbs address. Groupings are kept.
    pub fn activate(&mut self, ctx: ActiveContext) -> &mut Self {
        if self.active != ctx {
            debug!("Switching active context {} -> {}", self.active, ctx);
        }
        self.active = ctx;
        self
    }

    /// Activate by name; only `"nodes"` and `"edges"` are accepted
    pub fn activate_named(&mut self, name: &str) -> VerbResult<&mut Self> {
        let ctx = name.parse()?;
        Ok(self.activate(ctx))
    }

    /// Group the active table
    pub fn group_by(&mut self, spec: impl Into<GroupSpec>) -> VerbResult<&mut Self> {
        let spec = spec.into();
        let _guard = scope::enter(self.frame("group_by"));

        let snapshot = view::read(&self.store, self.active)?;
        let requested = if spec.columns.is_empty() {
            snapshot.columns().to_vec()
        } else {
            spec.columns
        };

        let mut vars: Vec<String> = match (spec.add, self.groups.get(self.active)) {
            (true, Some(existing)) => existing.vars().to_vec(),
            _ => Vec::new(),
        };
        for column in requested {
            if !vars.contains(&column) {
                vars.push(column);
            }
        }

        let grouping = table::group_by(&snapshot, &vars)?;
        debug!(
            "Grouped {} table by {:?} into {} groups",
            self.active,
            vars,
            grouping.n_groups()
        );
        self.groups.set(self.active, grouping);
        Ok(self)
    }

    /// Remove the grouping of the active table only
    pub fn ungroup(&mut self) -> &mut Self {
        if self.groups.clear(self.active).is_some() {
            debug!("Ungrouped {} table", self.active);
        }
        self
    }

    /// Keep the first row of every distinct combination of `keys` in the
    /// active table and delete the elements behind the other rows.
    ///
    /// An empty `keys` list compares whole rows (including `from`/`to` on the
    /// edge table). With `keep_all = false` only the key columns survive as
    /// attributes. Removing nodes removes their incident edges.
    pub fn distinct(&mut self, keys: &[&str], keep_all: bool) -> VerbResult<&mut Self> {
        let ctx = self.active;
        let _guard = scope::enter(self.frame("distinct"));

        let indexed = view::read_indexed(&self.store, ctx)?;
        if keys.contains(&ROW_ID_COLUMN) {
            return Err(VerbError::NamingCollision(ROW_ID_COLUMN.to_string()));
        }
        let key_columns: Vec<String> = if keys.is_empty() {
            indexed
                .columns()
                .iter()
                .filter(|c| c.as_str() != ROW_ID_COLUMN)
                .cloned()
                .collect()
        } else {
            let mut columns: Vec<String> = Vec::with_capacity(keys.len());
            for key in keys {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
            columns
        };

        let retained = table::distinct(&indexed.select(&key_columns)?, &[])?;
        let survivors = indexed.take(&retained);
        let kept: Vec<usize> = survivors
            .column_values(ROW_ID_COLUMN)?
            .into_iter()
            .filter_map(|id| id.as_integer())
            .map(|id| id as usize)
            .collect();
        let removed: Vec<usize> = (0..indexed.len())
            .filter(|row| kept.binary_search(row).is_err())
            .collect();

        let attributes = if keep_all {
            survivors
        } else {
            survivors.select(&key_columns)?
        };
        // Endpoint columns are not attributes, so losing them is not a trim
        let trimmed = !keep_all
            && indexed.columns().iter().any(|c| {
                c != ROW_ID_COLUMN
                    && !key_columns.contains(c)
                    && !(ctx == ActiveContext::Edges && (c == FROM_COLUMN || c == TO_COLUMN))
            });

        let removal = enforce::remove_rows(&mut self.store, ctx, &removed)?;
        view::write(&mut self.store, ctx, &attributes)?;
        self.regroup(ctx, trimmed)?;

        info!(
            "distinct on {} table kept {} of {} rows ({} nodes, {} edges removed)",
            ctx,
            kept.len(),
            indexed.len(),
            removal.nodes,
            removal.edges
        );
        Ok(self)
    }

    /// Rebuild both groupings after `changed` was restructured.
    ///
    /// Grouping columns that no longer exist are dropped from the grouping;
    /// a grouping left with none is removed. When `trimmed` is set and the
    /// policy is `Drop`, the grouping of `changed` is removed outright.
    fn regroup(&mut self, changed: ActiveContext, trimmed: bool) -> VerbResult<()> {
        for ctx in [ActiveContext::Nodes, ActiveContext::Edges] {
            let previous = match self.groups.clear(ctx) {
                Some(previous) => previous,
                None => continue,
            };
            let drop = self.config.distinct_grouping == DistinctGrouping::Drop;
            if ctx == changed && trimmed && drop {
                debug!("Dropped grouping of {} table after trimming distinct", ctx);
                continue;
            }

            let snapshot = view::read(&self.store, ctx)?;
            let vars: Vec<String> = previous
                .vars()
                .iter()
                .filter(|v| snapshot.has_column(v))
                .cloned()
                .collect();
            if vars.is_empty() && !previous.vars().is_empty() {
                debug!("No grouping column of {} table survived", ctx);
                continue;
            }
            self.groups.set(ctx, table::group_by(&snapshot, &vars)?);
        }
        Ok(())
    }

    fn frame(&self, verb: &'static str) -> GraphFrame {
        GraphFrame {
            verb,
            active: self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphStore, NodeId, PropertyValue};

    /// Nodes: (kind, n) = (a,1) (b,2) (a,3) (b,4); edges 0-1, 1-2, 2-3, 0-2
    fn graph() -> TableGraph {
        let mut store = GraphStore::new(true);
        for (kind, n) in [("a", 1i64), ("b", 2), ("a", 3), ("b", 4)] {
            let id = store.create_node();
            let node = store.get_node_mut(id).unwrap();
            node.set_property("kind", kind);
            node.set_property("n", n);
        }
        for (s, t, w) in [(0, 1, "x"), (1, 2, "y"), (2, 3, "x"), (0, 2, "y")] {
            let id = store.create_edge(NodeId::new(s), NodeId::new(t)).unwrap();
            store.get_edge_mut(id).unwrap().set_property("w", w);
        }
        TableGraph::from_store(store)
    }

    #[test]
    fn test_group_by_and_ungroup() {
        let mut g = graph();
        g.group_by(GroupSpec::by(["kind"])).unwrap();
        assert_eq!(g.group_vars(), vec!["kind".to_string()]);
        assert_eq!(g.n_groups(), 2);
        assert_eq!(g.group_size(), vec![2, 2]);
        assert_eq!(g.groups(), vec![vec![0, 2], vec![1, 3]]);

        g.ungroup();
        assert!(g.group_vars().is_empty());
        assert_eq!(g.n_groups(), 1);
    }

    #[test]
    fn test_group_by_adding() {
        let mut g = graph();
        g.group_by(GroupSpec::by(["kind"])).unwrap();
        g.group_by(GroupSpec::by(["n"]).adding()).unwrap();
        assert_eq!(g.group_vars(), vec!["kind".to_string(), "n".to_string()]);
        assert_eq!(g.n_groups(), 4);
    }

    #[test]
    fn test_group_by_all_columns_on_edges() {
        let mut g = graph();
        g.activate(ActiveContext::Edges).group_by(GroupSpec::all()).unwrap();
        assert_eq!(
            g.group_vars(),
            vec!["from".to_string(), "to".to_string(), "w".to_string()]
        );
    }

    #[test]
    fn test_group_by_missing_column_names_table() {
        let mut g = graph();
        g.activate(ActiveContext::Edges);
        let err = g.group_by(GroupSpec::by(["kind"])).unwrap_err();
        assert_eq!(
            err,
            VerbError::MissingColumn {
                column: "kind".to_string(),
                table: "edges".to_string(),
            }
        );
        assert_eq!(scope::depth(), 0);
    }

    #[test]
    fn test_distinct_nodes_cascades() {
        let mut g = graph();
        g.distinct(&["kind"], true).unwrap();

        assert_eq!(g.store().order(), 2);
        // Only the 0-1 edge has both endpoints among the survivors
        assert_eq!(g.store().size(), 1);
        assert_eq!(g.store().find_dangling_edge(), None);
        let ns: Vec<i64> = g
            .store()
            .all_nodes()
            .iter()
            .filter_map(|n| n.get_property("n").and_then(PropertyValue::as_integer))
            .collect();
        assert_eq!(ns, vec![1, 2]);
    }

    #[test]
    fn test_distinct_keep_only_keys() {
        let mut g = graph();
        g.distinct(&["kind"], false).unwrap();
        for node in g.store().all_nodes() {
            assert_eq!(node.property_count(), 1);
            assert!(node.has_property("kind"));
        }
    }

    #[test]
    fn test_distinct_repeated_keys() {
        let mut g = graph();
        g.distinct(&["kind", "kind"], false).unwrap();
        assert_eq!(g.store().order(), 2);
        assert_eq!(g.active_table().unwrap().columns(), &["kind".to_string()]);
        assert_eq!(g.store().node_columns(), &["kind".to_string()]);
    }

    #[test]
    fn test_distinct_edges_keeps_nodes() {
        let mut g = graph();
        g.activate(ActiveContext::Edges).distinct(&["w"], true).unwrap();
        assert_eq!(g.store().size(), 2);
        assert_eq!(g.store().order(), 4);
    }

    #[test]
    fn test_distinct_rejects_reserved_key() {
        let mut g = graph();
        let err = g.distinct(&[ROW_ID_COLUMN], true).unwrap_err();
        assert_eq!(err, VerbError::NamingCollision(ROW_ID_COLUMN.to_string()));
        assert_eq!(g.store().order(), 4);
    }

    #[test]
    fn test_distinct_regroups_cascaded_edges() {
        let mut g = graph();
        g.activate(ActiveContext::Edges).group_by(GroupSpec::by(["w"])).unwrap();
        g.activate(ActiveContext::Nodes).distinct(&["kind"], true).unwrap();

        g.activate(ActiveContext::Edges);
        assert_eq!(g.group_vars(), vec!["w".to_string()]);
        assert_eq!(g.group_size(), vec![1]);
    }

    #[test]
    fn test_trimming_distinct_grouping_policies() {
        let mut g = graph();
        g.group_by(GroupSpec::by(["kind", "n"])).unwrap();
        g.distinct(&["kind"], false).unwrap();
        assert_eq!(g.group_vars(), vec!["kind".to_string()]);
        assert_eq!(g.n_groups(), 2);

        let mut g = graph();
        g.config.distinct_grouping = DistinctGrouping::Drop;
        g.group_by(GroupSpec::by(["kind"])).unwrap();
        g.distinct(&["kind"], false).unwrap();
        assert!(g.group_vars().is_empty());
    }

    #[test]
    fn test_activate_named() {
        let mut g = graph();
        g.activate_named("edges").unwrap();
        assert_eq!(g.active(), ActiveContext::Edges);
        assert!(matches!(
            g.activate_named("links"),
            Err(VerbError::InvalidContext(_))
        ));
        assert_eq!(g.active(), ActiveContext::Edges);
    }
}
