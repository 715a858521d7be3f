//! Error types for the pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the document source
///
/// A source error for one path surfaces as a document-level failure in the
/// batch; it never aborts sibling documents.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file or directory does not exist
    #[error("not found: {0}")]
    NotFound(PathBuf),

    /// The extension is recognized but this build cannot decode it
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Filesystem error while reading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the batch runner itself
///
/// Per-document failures are not errors; they become failed
/// `DocumentResult`s. This covers only infrastructure faults.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The worker pool could not schedule a task
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}
