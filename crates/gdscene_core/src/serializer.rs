//! `.tscn` header serialization
//!
//! Emits the `gd_scene` header and one `ext_resource` declaration per distinct
//! resource instanced by the scene's top-level nodes:
//!
//! ```text
//! [gd_scene load_steps=3 format=2]
//! [ext_resource path="res://a.tscn" type="PackedScene" id=0]
//! [ext_resource path="res://b.tscn" type="PackedScene" id=1]
//! ```
//!
//! Resources are deduplicated by key, not by value, and ids follow the order
//! in which each key is first seen.

use std::collections::HashMap;
use std::fmt;

use crate::resource::{ResourceArena, ResourceKey};
use crate::scene::Scene;

/// Version of the text format this serializer writes
pub const FORMAT_VERSION: u32 = 2;

/// Error serializing a scene
#[derive(Debug, Clone, PartialEq)]
pub enum SerializeError {
    /// A referenced resource has an empty path (only external resources can be declared)
    EmptyPath {
        /// Id the resource would have been declared with
        id: usize,
    },
    /// A node references a key that is no longer in the arena
    MissingResource(ResourceKey),
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializeError::EmptyPath { id } => write!(
                f,
                "Resource {} has an empty path: only resources with a non-empty external path are supported",
                id
            ),
            SerializeError::MissingResource(key) => {
                write!(f, "Resource {:?} is not in the resource arena", key)
            }
        }
    }
}

impl std::error::Error for SerializeError {}

/// Resource keys in first-encounter order, with their assigned ids
///
/// Ids are positions in `order`, so iteration is always ascending by id.
#[derive(Debug, Default, Clone)]
pub struct ResourceTable {
    order: Vec<ResourceKey>,
    index: HashMap<ResourceKey, usize>,
}

impl ResourceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for a scene's top-level nodes
    pub fn collect(scene: &Scene) -> Self {
        let mut table = Self::new();
        for key in scene.instances() {
            table.record(key);
        }
        table
    }

    /// Get the id for `key`, assigning the next one if it is new
    pub fn record(&mut self, key: ResourceKey) -> usize {
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.order.len();
        self.order.push(key);
        self.index.insert(key, id);
        id
    }

    /// Id previously assigned to `key`
    pub fn id_of(&self, key: ResourceKey) -> Option<usize> {
        self.index.get(&key).copied()
    }

    /// Key declared with the given id
    pub fn key_of(&self, id: usize) -> Option<ResourceKey> {
        self.order.get(id).copied()
    }

    /// Number of distinct resources
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no resources were recorded
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(id, key)` pairs in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (usize, ResourceKey)> + '_ {
        self.order.iter().copied().enumerate()
    }

    /// Value of the header's `load_steps` field
    #[inline]
    pub fn load_steps(&self) -> usize {
        self.order.len() + 1
    }
}

/// Serialize the resource header of `scene`
///
/// Returns the whole document or an error; text is never returned for a scene
/// that fails validation.
pub fn serialize(scene: &Scene, resources: &ResourceArena) -> Result<String, SerializeError> {
    let table = ResourceTable::collect(scene);
    log::debug!(
        "Serializing scene '{}': {} nodes, {} distinct resources",
        scene.name,
        scene.len(),
        table.len()
    );

    let mut out = format!(
        "[gd_scene load_steps={} format={}]\n",
        table.load_steps(),
        FORMAT_VERSION
    );

    for (id, key) in table.iter() {
        let resource = resources
            .get(key)
            .ok_or(SerializeError::MissingResource(key))?;
        if !resource.is_external() {
            log::warn!("Scene '{}': resource {} has an empty path", scene.name, id);
            return Err(SerializeError::EmptyPath { id });
        }
        log::trace!("ext_resource {} -> {}", id, resource.path);
        out.push_str(&format!(
            "[ext_resource path={} type={} id={}]\n",
            quote(&resource.path),
            quote(resource.resource_type.as_str()),
            id
        ));
    }

    Ok(out)
}

/// Wrap `value` in double quotes, escaping anything that could break the line
///
/// Quotes and backslashes are backslash-escaped, common control characters use
/// their short escapes and the remaining control characters become `\xNN`.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
