//! Permitted-root path resolution for reading result files back

use crate::error::AccessError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// A directory boundary that read-back requests may not escape
///
/// Resolution distinguishes a target that does not exist (`NotFound`) from
/// a target that resolves outside the root (`OutsideRoot`); the two must
/// never be conflated, since the second is a policy violation and the
/// first is routine.
#[derive(Debug, Clone)]
pub struct PermittedRoot {
    root: PathBuf,
}

impl PermittedRoot {
    /// Establish a root, canonicalizing it so symlinked roots compare cleanly
    pub fn new(root: impl AsRef<Path>) -> Result<Self, AccessError> {
        let root = root.as_ref();
        let root = root
            .canonicalize()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AccessError::NotFound(root.to_path_buf()),
                _ => AccessError::Io(e),
            })?;
        Ok(Self { root })
    }

    /// The canonical root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a requested path to a canonical path inside the root
    ///
    /// `requested` may be absolute or relative to the root. Parent-directory
    /// components are rejected before touching the filesystem, and the
    /// canonicalized result is checked against the root so symlinks cannot
    /// smuggle a target out.
    pub fn resolve(&self, requested: impl AsRef<Path>) -> Result<PathBuf, AccessError> {
        let requested = requested.as_ref();

        if requested.components().any(|c| matches!(c, Component::ParentDir)) {
            warn!(path = %requested.display(), "Rejected traversal in requested path");
            return Err(AccessError::OutsideRoot(requested.to_path_buf()));
        }

        let candidate = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            self.root.join(requested)
        };

        let resolved = candidate.canonicalize().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AccessError::NotFound(requested.to_path_buf()),
            _ => AccessError::Io(e),
        })?;

        if !resolved.starts_with(&self.root) {
            warn!(path = %requested.display(), "Requested path resolves outside permitted root");
            return Err(AccessError::OutsideRoot(requested.to_path_buf()));
        }

        Ok(resolved)
    }

    /// Resolve and read a file under the root
    pub fn read(&self, requested: impl AsRef<Path>) -> Result<String, AccessError> {
        let path = self.resolve(requested)?;
        Ok(fs::read_to_string(path)?)
    }
}
