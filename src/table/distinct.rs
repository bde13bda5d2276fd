//! First-wins deduplication

use super::record::Table;
use super::TableResult;
use rustc_hash::FxHashSet;

/// Positions of the rows retained by a distinct over `keys`.
///
/// The first row in table order wins for every key combination. An empty
/// `keys` list compares whole rows. The result is strictly increasing.
pub fn distinct(table: &Table, keys: &[String]) -> TableResult<Vec<usize>> {
    table.require_columns(keys)?;
    let keys: Vec<String> = if keys.is_empty() {
        table.columns().to_vec()
    } else {
        keys.to_vec()
    };

    let mut seen = FxHashSet::default();
    let retained = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, record)| seen.insert(record.key(&keys)))
        .map(|(idx, _)| idx)
        .collect();
    Ok(retained)
}
