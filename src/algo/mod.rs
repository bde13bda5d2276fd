//! Structural graph predicates and the shape classifier
//!
//! Only the checks needed to describe a graph live here: simplicity,
//! connectivity, bipartiteness and acyclicity.

pub mod classify;
pub mod common;
pub mod community;
pub mod topology;

pub use classify::{classify, GraphShape};
pub use common::GraphView;
pub use community::{count_components, is_connected, weakly_connected_components, WccResult};
pub use topology::{is_bipartite, is_dag, is_simple};
