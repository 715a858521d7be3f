//! Error types for the output layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors while writing result files
#[derive(Debug, Error)]
pub enum OutputError {
    /// Two documents mapped to the same output name within one run.
    /// Structurally impossible with the stem+extension scheme; if it
    /// occurs the naming invariant is broken and the run must stop.
    #[error("duplicate output filename: {0}")]
    DuplicateOutputName(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from permitted-root path resolution
#[derive(Debug, Error)]
pub enum AccessError {
    /// The requested target does not exist under the root
    #[error("not found: {0}")]
    NotFound(PathBuf),

    /// The requested path escapes the permitted root
    #[error("path outside permitted root: {0}")]
    OutsideRoot(PathBuf),

    /// Filesystem error during resolution
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
