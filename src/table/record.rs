//! Record and table structures for the relational layer
//!
//! A [`Table`] is an ordered sequence of [`Record`]s sharing one schema.
//! Every record carries every column; missing cells hold `Null`.

use super::{missing_column, TableError, TableResult};
use crate::graph::{PropertyMap, PropertyValue};
use serde::{Deserialize, Serialize};

/// A single row: column name -> value, in schema order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    cells: PropertyMap,
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self {
            cells: PropertyMap::new(),
        }
    }

    /// Set a cell, appending the column if it is new
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<PropertyValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Get a cell
    pub fn get(&self, column: &str) -> Option<&PropertyValue> {
        self.cells.get(column)
    }

    /// Check if a column is present
    pub fn has(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Remove a cell, keeping the order of the rest
    pub fn remove(&mut self, column: &str) -> Option<PropertyValue> {
        self.cells.shift_remove(column)
    }

    /// All cells in schema order
    pub fn cells(&self) -> &PropertyMap {
        &self.cells
    }

    pub fn into_cells(self) -> PropertyMap {
        self.cells
    }

    /// Clone with only the given columns, in the given order
    pub fn project(&self, columns: &[String]) -> Record {
        let mut projected = Record::new();
        for column in columns {
            if let Some(value) = self.cells.get(column) {
                projected.set(column.clone(), value.clone());
            }
        }
        projected
    }

    /// Key tuple for hashing, `Null` for absent columns
    pub(crate) fn key(&self, columns: &[String]) -> Vec<PropertyValue> {
        columns
            .iter()
            .map(|c| self.cells.get(c).cloned().unwrap_or(PropertyValue::Null))
            .collect()
    }
}

impl From<PropertyMap> for Record {
    fn from(cells: PropertyMap) -> Self {
        Self { cells }
    }
}

/// An ordered record set with a fixed column list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Create an empty table with the given schema
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from rows.
    ///
    /// The schema is the union of row keys in first-seen order. Rows lacking
    /// a column get `Null`. Columns must be type-homogeneous.
    pub fn from_rows(rows: Vec<Record>) -> TableResult<Self> {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for column in row.cells().keys() {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.clone());
                }
            }
        }
        Self::with_schema(columns, rows)
    }

    /// Build a table against an explicit schema. Extra row keys are an error.
    pub fn with_schema(columns: Vec<String>, rows: Vec<Record>) -> TableResult<Self> {
        let mut normalized = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(extra) = row.cells().keys().find(|k| !columns.contains(k)) {
                return Err(TableError::UnknownColumn(extra.clone()));
            }
            let mut record = Record::new();
            for column in &columns {
                let value = row.get(column).cloned().unwrap_or(PropertyValue::Null);
                record.set(column.clone(), value);
            }
            normalized.push(record);
        }
        let table = Self {
            columns,
            rows: normalized,
        };
        table.check_homogeneous()?;
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    /// Get number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by index
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fail on the first column that is not in the schema
    pub fn require_columns(&self, columns: &[String]) -> TableResult<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(missing_column(missing)),
            None => Ok(()),
        }
    }

    /// All values of one column in row order
    pub fn column_values(&self, column: &str) -> TableResult<Vec<&PropertyValue>> {
        if !self.has_column(column) {
            return Err(missing_column(column));
        }
        Ok(self
            .rows
            .iter()
            .map(|r| r.get(column).unwrap_or(&PropertyValue::Null))
            .collect())
    }

    /// Keep only the given columns, in the given order
    pub fn select(&self, columns: &[String]) -> TableResult<Table> {
        self.require_columns(columns)?;
        Ok(Table {
            columns: columns.to_vec(),
            rows: self.rows.iter().map(|r| r.project(columns)).collect(),
        })
    }

    /// Remove columns; unknown names are ignored
    pub fn drop_columns(&self, columns: &[&str]) -> Table {
        let kept: Vec<String> = self
            .columns
            .iter()
            .filter(|c| !columns.contains(&c.as_str()))
            .cloned()
            .collect();
        Table {
            rows: self.rows.iter().map(|r| r.project(&kept)).collect(),
            columns: kept,
        }
    }

    /// Append (or overwrite) a column holding one value per row
    pub fn with_column(&self, column: &str, values: Vec<PropertyValue>) -> TableResult<Table> {
        if values.len() != self.rows.len() {
            return Err(TableError::LengthMismatch {
                column: column.to_string(),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        let mut columns = self.columns.clone();
        if !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }
        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut row = row.clone();
                row.set(column, value);
                row
            })
            .collect();
        let table = Table { columns, rows };
        table.check_homogeneous()?;
        Ok(table)
    }

    /// Rows at the given positions, in the given order
    pub fn take(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    fn check_homogeneous(&self) -> TableResult<()> {
        for column in &self.columns {
            let mut declared: Option<&PropertyValue> = None;
            for row in &self.rows {
                let value = match row.get(column) {
                    Some(v) if !v.is_null() => v,
                    _ => continue,
                };
                match declared {
                    None => declared = Some(value),
                    Some(first) if !first.same_type(value) => {
                        return Err(TableError::TypeMismatch {
                            column: column.clone(),
                            expected: first.type_name(),
                            found: value.type_name(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, PropertyValue)]) -> Record {
        let mut record = Record::new();
        for (k, v) in pairs {
            record.set(*k, v.clone());
        }
        record
    }

    #[test]
    fn test_from_rows_fills_schema() {
        let table = Table::from_rows(vec![
            row(&[("name", "a".into())]),
            row(&[("age", 3i64.into())]),
        ])
        .unwrap();

        assert_eq!(table.columns(), &["name".to_string(), "age".to_string()]);
        assert_eq!(table.get(0).unwrap().get("age"), Some(&PropertyValue::Null));
        assert_eq!(table.get(1).unwrap().get("name"), Some(&PropertyValue::Null));
    }

    #[test]
    fn test_type_mismatch() {
        let result = Table::from_rows(vec![
            row(&[("x", 1i64.into())]),
            row(&[("x", "one".into())]),
        ]);
        assert!(matches!(result, Err(TableError::TypeMismatch { .. })));
    }

    #[test]
    fn test_select_and_drop() {
        let table = Table::from_rows(vec![row(&[("a", 1i64.into()), ("b", 2i64.into())])]).unwrap();

        let selected = table.select(&["b".to_string()]).unwrap();
        assert_eq!(selected.columns(), &["b".to_string()]);
        assert!(!selected.get(0).unwrap().has("a"));

        let dropped = table.drop_columns(&["a", "zzz"]);
        assert_eq!(dropped.columns(), &["b".to_string()]);

        assert!(matches!(
            table.select(&["nope".to_string()]),
            Err(TableError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_with_column() {
        let table =
            Table::from_rows(vec![row(&[("a", 1i64.into())]), row(&[("a", 2i64.into())])]).unwrap();
        let extended = table
            .with_column("b", vec![true.into(), false.into()])
            .unwrap();
        assert_eq!(extended.columns().len(), 2);
        assert_eq!(extended.get(1).unwrap().get("b"), Some(&PropertyValue::Boolean(false)));

        let short = table.with_column("c", vec![true.into()]);
        assert!(matches!(short, Err(TableError::LengthMismatch { .. })));
    }

    #[test]
    fn test_take_preserves_requested_order() {
        let rows = (0..4).map(|i| row(&[("i", (i as i64).into())])).collect();
        let table = Table::from_rows(rows).unwrap();
        let taken = table.take(&[3, 1]);
        let values: Vec<i64> = taken
            .rows()
            .iter()
            .map(|r| r.get("i").unwrap().as_integer().unwrap())
            .collect();
        assert_eq!(values, vec![3, 1]);
    }
}
