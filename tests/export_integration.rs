//! Integration tests for manifest export
//!
//! Runs the bundled demo manifest through the same path the binary uses.

use gdscene::export::{output_path, render_manifest, ExportError};
use gdscene::config::OutputConfig;
use std::path::{Path, PathBuf};

#[test]
fn test_demo_manifest_renders() {
    let text = render_manifest("demos/arena.ron").unwrap();

    // Wall sits under Floor, so only the top-level torch is declared
    assert_eq!(
        text,
        "[gd_scene load_steps=2 format=2]\n\
         [ext_resource path=\"res://props/torch.tscn\" type=\"PackedScene\" id=0]\n"
    );
}

#[test]
fn test_demo_manifest_is_deterministic() {
    let first = render_manifest("demos/arena.ron").unwrap();
    let second = render_manifest("demos/arena.ron").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_manifest() {
    match render_manifest("demos/no_such_scene.ron") {
        Err(ExportError::Manifest(_)) => {}
        other => panic!("Expected Manifest error, got {:?}", other),
    }
}

#[test]
fn test_output_path_uses_configured_extension() {
    let config = OutputConfig {
        directory: PathBuf::from("build"),
        extension: "escn".to_string(),
        overwrite: false,
    };
    assert_eq!(
        output_path(Path::new("demos/arena.ron"), &config),
        PathBuf::from("build/arena.escn")
    );
}
