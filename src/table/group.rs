//! Grouping of table rows by key columns

use super::record::Table;
use super::TableResult;
use crate::graph::PropertyValue;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Partition of a table's rows by the values of `vars`.
///
/// Groups are numbered in order of their first row. Rows inside a group
/// keep table order. Every row belongs to exactly one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grouping {
    vars: Vec<String>,
    keys: Vec<Vec<PropertyValue>>,
    rows: Vec<Vec<usize>>,
    membership: Vec<usize>,
}

impl Grouping {
    /// The implicit grouping of an ungrouped table of `len` rows
    pub fn ungrouped(len: usize) -> Self {
        let (keys, rows) = if len == 0 {
            (Vec::new(), Vec::new())
        } else {
            (vec![Vec::new()], vec![(0..len).collect()])
        };
        Grouping {
            vars: Vec::new(),
            keys,
            rows,
            membership: vec![0; len],
        }
    }

    /// Grouping columns
    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    pub fn n_groups(&self) -> usize {
        self.rows.len()
    }

    /// Size of every group, by group index
    pub fn group_sizes(&self) -> Vec<usize> {
        self.rows.iter().map(Vec::len).collect()
    }

    /// Row indices of every group
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// Key tuple of every group, aligned with `vars`
    pub fn keys(&self) -> &[Vec<PropertyValue>] {
        &self.keys
    }

    /// Group index of every row
    pub fn indices(&self) -> &[usize] {
        &self.membership
    }
}

/// Group a table by the given columns.
///
/// An empty `vars` list yields one group spanning all rows (none for an
/// empty table).
pub fn group_by(table: &Table, vars: &[String]) -> TableResult<Grouping> {
    table.require_columns(vars)?;

    let mut lookup: FxHashMap<Vec<PropertyValue>, usize> = FxHashMap::default();
    let mut keys = Vec::new();
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut membership = Vec::with_capacity(table.len());

    for (idx, record) in table.rows().iter().enumerate() {
        let key = record.key(vars);
        let group = match lookup.get(&key) {
            Some(&g) => g,
            None => {
                let g = rows.len();
                lookup.insert(key.clone(), g);
                keys.push(key);
                rows.push(Vec::new());
                g
            }
        };
        rows[group].push(idx);
        membership.push(group);
    }

    Ok(Grouping {
        vars: vars.to_vec(),
        keys,
        rows,
        membership,
    })
}
