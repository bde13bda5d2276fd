//! Relational table engine
//!
//! Ordered record sets with the two operations the graph verbs need:
//! grouping and first-wins deduplication. Row order is never changed.

pub mod distinct;
pub mod group;
pub mod record;

pub use distinct::distinct;
pub use group::{group_by, Grouping};
pub use record::{Record, Table};

use crate::bridge::scope;
use thiserror::Error;

/// Table errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Referenced column absent from the schema
    #[error("Column '{column}' not found in {table} table")]
    MissingColumn { column: String, table: String },

    /// Row carries a column the schema does not declare
    #[error("Row has undeclared column '{0}'")]
    UnknownColumn(String),

    /// Column holds more than one value type
    #[error("Column '{column}' holds {found} values but is declared {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Wrong number of values for a new column
    #[error("Column '{column}' needs {expected} values, got {found}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
}

pub type TableResult<T> = Result<T, TableError>;

/// Missing-column error naming the table of the verb currently running
pub(crate) fn missing_column(column: &str) -> TableError {
    let table = scope::current_active()
        .map(|ctx| ctx.to_string())
        .unwrap_or_else(|| "detached".to_string());
    TableError::MissingColumn {
        column: column.to_string(),
        table,
    }
}
