//! Per-context grouping state
//!
//! Each table keeps its own grouping so that switching the active context
//! never disturbs the other table's groups.

use super::context::ActiveContext;
use crate::table::Grouping;

/// Grouping state of a graph, one optional entry per table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupShadowState {
    nodes: Option<Grouping>,
    edges: Option<Grouping>,
}

/// Which tables currently retain a grouping
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupState<'a> {
    Ungrouped,
    Nodes(&'a Grouping),
    Edges(&'a Grouping),
    Both {
        nodes: &'a Grouping,
        edges: &'a Grouping,
    },
}

impl GroupShadowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ctx: ActiveContext) -> Option<&Grouping> {
        match ctx {
            ActiveContext::Nodes => self.nodes.as_ref(),
            ActiveContext::Edges => self.edges.as_ref(),
        }
    }

    /// Store a grouping, replacing any previous one for `ctx`
    pub fn set(&mut self, ctx: ActiveContext, grouping: Grouping) {
        *self.slot(ctx) = Some(grouping);
    }

    /// Remove and return the grouping for `ctx`
    pub fn clear(&mut self, ctx: ActiveContext) -> Option<Grouping> {
        self.slot(ctx).take()
    }

    /// Whether any table retains a grouping
    pub fn is_grouped(&self) -> bool {
        self.nodes.is_some() || self.edges.is_some()
    }

    pub fn state(&self) -> GroupState<'_> {
        match (&self.nodes, &self.edges) {
            (None, None) => GroupState::Ungrouped,
            (Some(nodes), None) => GroupState::Nodes(nodes),
            (None, Some(edges)) => GroupState::Edges(edges),
            (Some(nodes), Some(edges)) => GroupState::Both { nodes, edges },
        }
    }

    fn slot(&mut self, ctx: ActiveContext) -> &mut Option<Grouping> {
        match ctx {
            ActiveContext::Nodes => &mut self.nodes,
            ActiveContext::Edges => &mut self.edges,
        }
    }
}
