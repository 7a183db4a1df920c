//! Scene manifests
//!
//! Provides [`SceneManifest`], the RON authoring form of a scene. A manifest
//! lists resources once and lets nodes refer to them by index; instantiating
//! it produces a [`ResourceArena`] plus a [`Scene`] whose nodes hold keys.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::node::{Node, NodeType};
use crate::resource::{Resource, ResourceArena, ResourceKey, ResourceType};
use crate::scene::Scene;

/// Serializable resource declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTemplate {
    /// Resource path, e.g. `res://props/crate.tscn`
    pub path: String,
    /// Resource kind
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

impl ResourceTemplate {
    /// Create a packed scene template
    pub fn packed_scene(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            resource_type: ResourceType::PackedScene,
        }
    }

    fn to_resource(&self) -> Resource {
        Resource::new(self.path.clone(), self.resource_type)
    }
}

/// Serializable node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    /// Node name
    pub name: String,
    /// Node class tag
    #[serde(rename = "type")]
    pub node_type: String,
    /// Index into the manifest's `resources`
    #[serde(default)]
    pub instance: Option<usize>,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<NodeTemplate>,
}

impl NodeTemplate {
    /// Create a node template without instance or children
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            instance: None,
            children: Vec::new(),
        }
    }

    /// Set the resource index this node instances
    pub fn with_instance(mut self, index: usize) -> Self {
        self.instance = Some(index);
        self
    }

    /// Add a child template
    pub fn with_child(mut self, child: NodeTemplate) -> Self {
        self.children.push(child);
        self
    }

    fn to_node(&self, keys: &[ResourceKey]) -> Result<Node, ManifestError> {
        let mut node = Node::new(self.name.clone(), NodeType::new(self.node_type.clone()));
        if let Some(index) = self.instance {
            let key = keys.get(index).copied().ok_or_else(|| ManifestError::DanglingInstance {
                node: self.name.clone(),
                index,
            })?;
            node.instance = Some(key);
        }
        for child in &self.children {
            node.add_child(child.to_node(keys)?);
        }
        Ok(node)
    }

    fn from_node(
        node: &Node,
        resources: &ResourceArena,
        templates: &mut Vec<ResourceTemplate>,
        indices: &mut HashMap<ResourceKey, usize>,
    ) -> Result<Self, ManifestError> {
        let instance = match node.instance {
            Some(key) => Some(match indices.get(&key) {
                Some(&index) => index,
                None => {
                    let resource = resources
                        .get(key)
                        .ok_or(ManifestError::MissingResource(key))?;
                    let index = templates.len();
                    templates.push(ResourceTemplate {
                        path: resource.path.clone(),
                        resource_type: resource.resource_type,
                    });
                    indices.insert(key, index);
                    index
                }
            }),
            None => None,
        };

        let children = node
            .children
            .iter()
            .map(|child| Self::from_node(child, resources, templates, indices))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: node.name.clone(),
            node_type: node.node_type.to_string(),
            instance,
            children,
        })
    }
}

/// A serializable scene with its resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Resources nodes can instance, referred to by index
    #[serde(default)]
    pub resources: Vec<ResourceTemplate>,
    /// Top-level nodes
    #[serde(default)]
    pub nodes: Vec<NodeTemplate>,
}

impl SceneManifest {
    /// Create a new empty manifest
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Add a resource template, returning its index
    pub fn add_resource(&mut self, resource: ResourceTemplate) -> usize {
        self.resources.push(resource);
        self.resources.len() - 1
    }

    /// Add a top-level node template
    pub fn add_node(&mut self, node: NodeTemplate) {
        self.nodes.push(node);
    }

    /// Load a manifest from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        log::debug!("Loading scene manifest from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Save a manifest to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ManifestError> {
        let contents = self.to_ron_string()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Parse a manifest from RON text
    pub fn from_ron_str(contents: &str) -> Result<Self, ManifestError> {
        Ok(ron::from_str(contents)?)
    }

    /// Render the manifest as pretty RON
    pub fn to_ron_string(&self) -> Result<String, ManifestError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Build a resource arena and a scene from this manifest
    ///
    /// Every resource template gets its own key, so two templates with the
    /// same path are still two resources.
    pub fn instantiate(&self) -> Result<(ResourceArena, Scene), ManifestError> {
        let mut arena = ResourceArena::with_capacity(self.resources.len());
        let keys: Vec<ResourceKey> = self
            .resources
            .iter()
            .map(|template| arena.insert(template.to_resource()))
            .collect();

        let mut scene = Scene::new(self.name.clone());
        for template in &self.nodes {
            scene.add_node(template.to_node(&keys)?);
        }

        log::debug!(
            "Instantiated manifest '{}': {} resources, {} top-level nodes",
            self.name,
            arena.len(),
            scene.len()
        );
        Ok((arena, scene))
    }

    /// Capture a scene and the resources it references
    ///
    /// Only resources reachable from the scene's nodes are written, indexed in
    /// depth-first encounter order.
    pub fn from_scene(scene: &Scene, resources: &ResourceArena) -> Result<Self, ManifestError> {
        let mut templates = Vec::new();
        let mut indices = HashMap::new();
        let nodes = scene
            .nodes
            .iter()
            .map(|node| NodeTemplate::from_node(node, resources, &mut templates, &mut indices))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: scene.name.clone(),
            resources: templates,
            nodes,
        })
    }
}

/// Error loading, saving or instantiating a manifest
#[derive(Debug)]
pub enum ManifestError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax or unknown resource type)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
    /// A node refers to a resource index the manifest doesn't have
    DanglingInstance {
        /// Name of the offending node
        node: String,
        /// Index it referred to
        index: usize,
    },
    /// A scene node holds a key that is no longer in the arena
    MissingResource(ResourceKey),
}

impl From<io::Error> for ManifestError {
    fn from(e: io::Error) -> Self {
        ManifestError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ManifestError {
    fn from(e: ron::error::SpannedError) -> Self {
        ManifestError::Parse(e)
    }
}

impl From<ron::Error> for ManifestError {
    fn from(e: ron::Error) -> Self {
        ManifestError::Serialize(e)
    }
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Io(e) => write!(f, "IO error: {}", e),
            ManifestError::Parse(e) => write!(f, "Parse error: {}", e),
            ManifestError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ManifestError::DanglingInstance { node, index } => {
                write!(f, "Node '{}' instances missing resource #{}", node, index)
            }
            ManifestError::MissingResource(key) => {
                write!(f, "Resource {:?} is not in the resource arena", key)
            }
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::Io(e) => Some(e),
            ManifestError::Parse(e) => Some(e),
            ManifestError::Serialize(e) => Some(e),
            ManifestError::DanglingInstance { .. } => None,
            ManifestError::MissingResource(_) => None,
        }
    }
}
