//! Edge implementation for the attributed graph

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// An edge between two nodes
///
/// Edges have:
/// - A dense id
/// - A source node (read-only `from` column in the edge table)
/// - A target node (read-only `to` column in the edge table)
/// - Attributes (ordered key-value pairs)
///
/// Direction is a property of the whole graph, not of the edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Dense identifier for this edge
    pub id: EdgeId,

    /// Source node
    pub source: NodeId,

    /// Target node
    pub target: NodeId,

    /// Attributes associated with this edge
    pub properties: PropertyMap,
}

impl Edge {
    /// Create an edge without attributes
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Edge {
            id,
            source,
            target,
            properties: PropertyMap::new(),
        }
    }

    /// Create an edge with attributes
    pub fn new_with_properties(
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        properties: PropertyMap,
    ) -> Self {
        Edge {
            id,
            source,
            target,
            properties,
        }
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Remove a property
    pub fn remove_property(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.shift_remove(key)
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.source == other.source
            && self.target == other.target
            && self.properties == other.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_edge() {
        let edge = Edge::new(EdgeId::new(1), NodeId::new(1), NodeId::new(2));

        assert_eq!(edge.id, EdgeId::new(1));
        assert_eq!(edge.source, NodeId::new(1));
        assert_eq!(edge.target, NodeId::new(2));
    }

    #[test]
    fn test_edge_properties() {
        let mut edge = Edge::new(EdgeId::new(3), NodeId::new(1), NodeId::new(2));

        edge.set_property("since", 2020i64);
        edge.set_property("strength", 0.95);
        edge.set_property("verified", true);

        assert_eq!(edge.get_property("since").unwrap().as_integer(), Some(2020));
        assert_eq!(edge.get_property("strength").unwrap().as_float(), Some(0.95));
        assert_eq!(edge.get_property("verified").unwrap().as_boolean(), Some(true));
        assert_eq!(edge.property_count(), 3);
    }


    #[test]
    fn test_remove_property() {
        let mut edge = Edge::new(EdgeId::new(6), NodeId::new(1), NodeId::new(1));

        edge.set_property("temp", "value");
        assert!(edge.has_property("temp"));

        let removed = edge.remove_property("temp");
        assert!(removed.is_some());
        assert!(!edge.has_property("temp"));
        assert_eq!(edge.property_count(), 0);
    }
}
