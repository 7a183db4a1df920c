//! gdscene - `.tscn` scene header generator
//!
//! Library half of the `gdscene` binary: configuration and manifest export.
//! The scene model and serializer live in [`gdscene_core`].

pub mod config;
pub mod export;

pub use gdscene_core as core;
