//! Scene nodes
//!
//! A node owns its children. The link back to the parent is a node path
//! (`"."` for children of a top-level node, `"Parent/Child"` further down),
//! which is how the text format refers to parents.

use std::fmt;

use crate::resource::ResourceKey;

/// Path used for children of a top-level node
pub const ROOT_PATH: &str = ".";

/// Free-form node class tag (`Node2D`, `Spatial`, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeType(pub String);

impl NodeType {
    /// Create a node type tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Get the tag as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeType {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

/// A node in a scene tree
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    /// Node name, unique among its siblings in a well-formed scene
    pub name: String,
    /// Node class tag
    pub node_type: NodeType,
    /// Resource this node instances, if any
    pub instance: Option<ResourceKey>,
    /// Path of the parent node, `None` for top-level nodes
    pub parent: Option<String>,
    /// Child nodes, in order
    pub children: Vec<Node>,
}

impl Node {
    /// Create a plain node with no instance and no children
    pub fn new(name: impl Into<String>, node_type: impl Into<NodeType>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            instance: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a node that instances the given resource
    pub fn instanced(name: impl Into<String>, node_type: impl Into<NodeType>, resource: ResourceKey) -> Self {
        Self::new(name, node_type).with_instance(resource)
    }

    /// Set the instanced resource
    pub fn with_instance(mut self, resource: ResourceKey) -> Self {
        self.instance = Some(resource);
        self
    }

    /// Append a child (builder style)
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Append a child, pointing it (and its subtree) back at this node
    pub fn add_child(&mut self, mut child: Node) {
        child.set_parent(self.path_for_children());
        self.children.push(child);
    }

    /// Whether this node instances a resource
    #[inline]
    pub fn is_instance(&self) -> bool {
        self.instance.is_some()
    }

    /// Path that children of this node use as their parent path
    pub fn path_for_children(&self) -> String {
        match self.parent.as_deref() {
            None => ROOT_PATH.to_string(),
            Some(ROOT_PATH) => self.name.clone(),
            Some(parent) => format!("{}/{}", parent, self.name),
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }

    fn set_parent(&mut self, parent: String) {
        self.parent = Some(parent);
        let child_path = self.path_for_children();
        for child in &mut self.children {
            child.set_parent(child_path.clone());
        }
    }
}
