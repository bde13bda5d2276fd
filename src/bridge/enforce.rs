//! Structural deletions that keep the edge set closed over the node set

use super::context::ActiveContext;
use super::VerbResult;
use crate::graph::{EdgeId, GraphStore, NodeId, Removal};
use tracing::debug;

/// Delete the elements at the given row positions of the `ctx` table.
///
/// Node removals cascade to every incident edge. Edge removals leave nodes
/// untouched. Survivors keep their relative order.
pub fn remove_rows(
    store: &mut GraphStore,
    ctx: ActiveContext,
    rows: &[usize],
) -> VerbResult<Removal> {
    if rows.is_empty() {
        return Ok(Removal::default());
    }

    let removal = match ctx {
        ActiveContext::Nodes => {
            let ids: Vec<NodeId> = rows.iter().copied().map(NodeId::new).collect();
            store.delete_nodes(&ids)?
        }
        ActiveContext::Edges => {
            let ids: Vec<EdgeId> = rows.iter().copied().map(EdgeId::new).collect();
            store.delete_edges(&ids)?
        }
    };

    debug_assert!(
        store.find_dangling_edge().is_none(),
        "edge references a removed node"
    );
    debug!(
        "Removed {} rows from {} table ({} nodes, {} edges)",
        rows.len(),
        ctx,
        removal.nodes,
        removal.edges
    );
    Ok(removal)
}
