//! Core types for gdscene
//!
//! This crate provides the scene model and its text serializer:
//!
//! - [`Resource`] - An external, path-backed resource
//! - [`ResourceArena`] - Owner of resources, addressed by [`ResourceKey`]
//! - [`Node`] - A scene node, optionally instancing a resource
//! - [`Scene`] - Ordered sequence of top-level nodes
//! - [`ResourceTable`] - First-encounter resource ids for one scene
//! - [`serialize`] - Render a scene's `.tscn` resource header
//! - [`SceneManifest`] - RON authoring form of a scene and its resources

mod resource;
mod node;
mod scene;
mod serializer;
mod manifest;

pub use resource::{Resource, ResourceArena, ResourceKey, ResourceType, UnknownResourceType};
pub use node::{Node, NodeType, ROOT_PATH};
pub use scene::Scene;
pub use serializer::{serialize, quote, ResourceTable, SerializeError, FORMAT_VERSION};
pub use manifest::{SceneManifest, ResourceTemplate, NodeTemplate, ManifestError};
