//! External resources and the arena that owns them
//!
//! Resources are identified by their [`ResourceKey`], not by value: two
//! resources with the same path and type inserted separately are distinct.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::str::FromStr;

new_key_type! {
    /// Key to a resource in a [`ResourceArena`]
    ///
    /// Generational: once a resource is removed, old keys resolve to `None`
    /// rather than to whatever reuses the slot.
    pub struct ResourceKey;
}

/// Kind of an external resource
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    /// A scene saved to its own file and instanced into another one
    PackedScene,
}

impl ResourceType {
    /// The tag written into `ext_resource` declarations
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::PackedScene => "PackedScene",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a resource type tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResourceType(pub String);

impl fmt::Display for UnknownResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown resource type: '{}'", self.0)
    }
}

impl std::error::Error for UnknownResourceType {}

impl FromStr for ResourceType {
    type Err = UnknownResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PackedScene" => Ok(ResourceType::PackedScene),
            other => Err(UnknownResourceType(other.to_string())),
        }
    }
}

/// An external, path-backed resource
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    /// Path of the asset, usually `res://...`
    pub path: String,
    /// Kind of asset behind the path
    pub resource_type: ResourceType,
}

impl Resource {
    /// Create a resource of the given type
    pub fn new(path: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            path: path.into(),
            resource_type,
        }
    }

    /// Create a packed scene resource
    pub fn packed_scene(path: impl Into<String>) -> Self {
        Self::new(path, ResourceType::PackedScene)
    }

    /// Whether this resource points at an external file
    #[inline]
    pub fn is_external(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Owner of all resources a scene can reference
///
/// Nodes hold [`ResourceKey`]s into an arena rather than references, so the
/// arena must outlive any scene serialized against it.
#[derive(Debug, Default)]
pub struct ResourceArena {
    resources: SlotMap<ResourceKey, Resource>,
}

impl ResourceArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self {
            resources: SlotMap::with_key(),
        }
    }

    /// Create an arena with room for `capacity` resources
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            resources: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Add a resource, returning its key
    pub fn insert(&mut self, resource: Resource) -> ResourceKey {
        self.resources.insert(resource)
    }

    /// Remove a resource. Keys to it become stale.
    pub fn remove(&mut self, key: ResourceKey) -> Option<Resource> {
        self.resources.remove(key)
    }

    /// Get a resource by key
    pub fn get(&self, key: ResourceKey) -> Option<&Resource> {
        self.resources.get(key)
    }

    /// Get a mutable resource by key
    pub fn get_mut(&mut self, key: ResourceKey) -> Option<&mut Resource> {
        self.resources.get_mut(key)
    }

    /// Check whether a key still refers to a live resource
    #[inline]
    pub fn contains(&self, key: ResourceKey) -> bool {
        self.resources.contains_key(key)
    }

    /// Number of resources in the arena
    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if the arena is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterate over all resources (slot order, not insertion order)
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKey, &Resource)> {
        self.resources.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_tag() {
        assert_eq!(ResourceType::PackedScene.as_str(), "PackedScene");
        assert_eq!(format!("{}", ResourceType::PackedScene), "PackedScene");
    }

    #[test]
    fn test_resource_type_from_str() {
        assert_eq!("PackedScene".parse::<ResourceType>(), Ok(ResourceType::PackedScene));

        let err = "Texture".parse::<ResourceType>().unwrap_err();
        assert_eq!(err, UnknownResourceType("Texture".to_string()));
        assert_eq!(format!("{}", err), "Unknown resource type: 'Texture'");
    }

    #[test]
    fn test_packed_scene_constructor() {
        let res = Resource::packed_scene("res://a.tscn");
        assert_eq!(res.path, "res://a.tscn");
        assert_eq!(res.resource_type, ResourceType::PackedScene);
        assert!(res.is_external());
        assert!(!Resource::packed_scene("").is_external());
    }

    #[test]
    fn test_equal_resources_get_distinct_keys() {
        let mut arena = ResourceArena::new();
        let a = arena.insert(Resource::packed_scene("res://a.tscn"));
        let b = arena.insert(Resource::packed_scene("res://a.tscn"));

        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), arena.get(b));
    }

    #[test]
    fn test_removed_key_is_stale() {
        let mut arena = ResourceArena::with_capacity(4);
        let a = arena.insert(Resource::packed_scene("res://a.tscn"));
        assert!(arena.contains(a));

        let removed = arena.remove(a).unwrap();
        assert_eq!(removed.path, "res://a.tscn");
        assert!(!arena.contains(a));
        assert!(arena.get(a).is_none());

        // Reusing the slot must not revive the old key
        let b = arena.insert(Resource::packed_scene("res://b.tscn"));
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b).unwrap().path, "res://b.tscn");
    }

    #[test]
    fn test_get_mut() {
        let mut arena = ResourceArena::new();
        let a = arena.insert(Resource::packed_scene("res://a.tscn"));
        arena.get_mut(a).unwrap().path = "res://moved.tscn".to_string();
        assert_eq!(arena.get(a).unwrap().path, "res://moved.tscn");
    }
}
