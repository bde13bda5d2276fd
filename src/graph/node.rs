//! Node implementation for the attributed graph

use super::property::{PropertyMap, PropertyValue};
use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// A node in the graph
///
/// Nodes carry a dense id and an ordered attribute map. The id is
/// rewritten by the store whenever a deletion compacts the node set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Dense identifier, valid for the current structural epoch
    pub id: NodeId,

    /// Attributes associated with this node
    pub properties: PropertyMap,
}

impl Node {
    /// Create a node without attributes
    pub fn new(id: NodeId) -> Self {
        Node {
            id,
            properties: PropertyMap::new(),
        }
    }

    /// Create a node with attributes
    pub fn new_with_properties(id: NodeId, properties: PropertyMap) -> Self {
        Node { id, properties }
    }

    /// Set a property value
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Remove a property, keeping the order of the remaining ones
    pub fn remove_property(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.shift_remove(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.properties == other.properties
    }
}
