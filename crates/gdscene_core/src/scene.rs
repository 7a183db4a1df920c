//! Scenes
//!
//! A [`Scene`] is an ordered list of top-level nodes. Resources are kept in a
//! separate [`ResourceArena`] owned by the caller.

use crate::node::Node;
use crate::resource::{ResourceArena, ResourceKey};
use crate::serializer::{self, SerializeError};

/// An ordered sequence of top-level nodes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Top-level nodes, in document order
    pub nodes: Vec<Node>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Append a top-level node
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Append a top-level node (builder style)
    pub fn with_node(mut self, node: Node) -> Self {
        self.add_node(node);
        self
    }

    /// Number of top-level nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the scene has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resource keys instanced by top-level nodes, in node order, repeats included
    pub fn instances(&self) -> impl Iterator<Item = ResourceKey> + '_ {
        self.nodes.iter().filter_map(|node| node.instance)
    }

    /// Render the scene header as `.tscn` text
    ///
    /// See [`serializer::serialize`].
    pub fn to_tscn(&self, resources: &ResourceArena) -> Result<String, SerializeError> {
        serializer::serialize(self, resources)
    }
}
