//! Manifest to `.tscn` export
//!
//! Glue between [`SceneManifest`] files on disk and the header serializer,
//! used by the `gdscene` binary.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gdscene_core::{ManifestError, SceneManifest, SerializeError};

use crate::config::OutputConfig;

/// Error exporting one manifest
#[derive(Debug)]
pub enum ExportError {
    /// Manifest could not be loaded or instantiated
    Manifest(ManifestError),
    /// Scene could not be serialized
    Serialize(SerializeError),
    /// IO error writing the output
    Io(io::Error),
    /// Output exists and overwriting is disabled
    AlreadyExists(PathBuf),
}

impl From<ManifestError> for ExportError {
    fn from(e: ManifestError) -> Self {
        ExportError::Manifest(e)
    }
}

impl From<SerializeError> for ExportError {
    fn from(e: SerializeError) -> Self {
        ExportError::Serialize(e)
    }
}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Manifest(e) => write!(f, "Manifest error: {}", e),
            ExportError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::AlreadyExists(path) => {
                write!(f, "Output already exists: {} (set output.overwrite to replace it)", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Manifest(e) => Some(e),
            ExportError::Serialize(e) => Some(e),
            ExportError::Io(e) => Some(e),
            ExportError::AlreadyExists(_) => None,
        }
    }
}

/// Load a manifest and render its `.tscn` text
pub fn render_manifest<P: AsRef<Path>>(manifest_path: P) -> Result<String, ExportError> {
    let manifest = SceneManifest::load(manifest_path)?;
    let (resources, scene) = manifest.instantiate()?;
    Ok(scene.to_tscn(&resources)?)
}

/// Output path for a manifest: `<directory>/<file stem>.<extension>`
pub fn output_path(manifest_path: &Path, config: &OutputConfig) -> PathBuf {
    let mut file_name = manifest_path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "scene".into());
    file_name.push(".");
    file_name.push(&config.extension);
    config.directory.join(file_name)
}

/// Render a manifest and write it under the configured output directory
///
/// Nothing is written unless the whole document serialized successfully.
pub fn export_manifest<P: AsRef<Path>>(
    manifest_path: P,
    config: &OutputConfig,
) -> Result<PathBuf, ExportError> {
    let manifest_path = manifest_path.as_ref();
    let text = render_manifest(manifest_path)?;

    let target = output_path(manifest_path, config);
    if target.exists() && !config.overwrite {
        return Err(ExportError::AlreadyExists(target));
    }

    fs::create_dir_all(&config.directory)?;
    fs::write(&target, text)?;
    log::info!("Wrote {} -> {}", manifest_path.display(), target.display());
    Ok(target)
}
