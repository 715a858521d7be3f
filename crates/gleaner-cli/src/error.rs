//! Error types for the CLI application.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Document discovery or loading error
    #[error("Input error: {0}")]
    Source(#[from] gleaner_pipeline::SourceError),

    /// Batch pipeline error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] gleaner_pipeline::PipelineError),

    /// Result file writing error
    #[error("Output error: {0}")]
    Output(#[from] gleaner_output::OutputError),

    /// Read-back path resolution error
    #[error("Access error: {0}")]
    Access(#[from] gleaner_output::AccessError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The input directory held no supported documents
    #[error("No supported documents found in {0}")]
    NoDocuments(PathBuf),
}
