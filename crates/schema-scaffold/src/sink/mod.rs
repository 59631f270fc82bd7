//! Artifact sinks.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::ArtifactSink;
use crate::error::{Result, ScaffoldError};

/// Writes artifacts to the local filesystem.
///
/// Content goes to a sibling temp file first and is renamed over the
/// destination, so a reader sees either the old artifact or the new one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl FsSink {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactSink for FsSink {
    fn write_artifact(&self, path: &Path, text: &str) -> Result<()> {
        let describe = |e: std::io::Error| ScaffoldError::artifact(path.display().to_string(), e.to_string());

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(describe)?;
        }

        // Atomic write: write to temp file, then rename
        let temp_path = temp_path_for(path);
        std::fs::write(&temp_path, text).map_err(describe)?;
        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(describe(e));
        }

        debug!("Wrote {} bytes to {:?}", text.len(), path);
        Ok(())
    }
}

/// `<path>.tmp`, keeping the artifact's own extension.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
