//! Filesystem document source
//!
//! Non-recursive, deterministic discovery plus text loading. Binary-format
//! decoding (PDF, Word) is a collaborator concern; those files are still
//! discovered so they occupy an output slot, but loading them reports an
//! unsupported-format failure.

use crate::error::SourceError;
use gleaner_domain::traits::DocumentSource;
use gleaner_domain::Document;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Input extensions the scanner picks up (case-insensitive)
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["txt", "pdf", "docx", "doc"];

/// Document source over a local directory
#[derive(Debug, Default, Clone)]
pub struct FsDocumentSource;

impl FsDocumentSource {
    /// Create a filesystem document source
    pub fn new() -> Self {
        Self
    }

    fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let lower = ext.to_lowercase();
                SUPPORTED_EXTENSIONS.contains(&lower.as_str())
            })
            .unwrap_or(false)
    }
}

impl DocumentSource for FsDocumentSource {
    type Error = SourceError;

    /// List supported files directly under `dir`, sorted by filename
    fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
        if !dir.exists() {
            return Err(SourceError::NotFound(dir.to_path_buf()));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && Self::is_supported(&path) {
                paths.push(path);
            }
        }

        // Deterministic batch order regardless of directory iteration order
        paths.sort();
        debug!(dir = %dir.display(), files = paths.len(), "Discovered documents");
        Ok(paths)
    }

    fn load(&self, path: &Path) -> Result<Document, SourceError> {
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => {
                let bytes = fs::read(path)?;
                // UTF-8 first, lossy for legacy encodings
                let text = match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
                };
                Ok(Document::new(filename, text))
            }
            "pdf" | "docx" | "doc" => Err(SourceError::UnsupportedFormat(extension)),
            other => Err(SourceError::UnsupportedFormat(other.to_string())),
        }
    }
}
