//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates: extractors in
//! `gleaner-extractors`, language model providers in `gleaner-llm`, the
//! filesystem document source in `gleaner-pipeline`.

use crate::document::Document;
use crate::record::ExtractionRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error from a single extractor run
///
/// This is a concrete type rather than an associated one so extractors can
/// live together in a flat `Arc<dyn FieldExtractor>` registry.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The language model call failed after retries
    #[error("language model call failed: {0}")]
    Llm(String),

    /// The model replied, but no usable payload could be recovered
    #[error("unusable model response: {0}")]
    InvalidResponse(String),
}

/// A pluggable field extractor
///
/// Extractors are registered with the pipeline orchestrator, which runs
/// them in descending priority order (ties broken by registration order).
/// They must be `Send + Sync`: document tasks run concurrently.
pub trait FieldExtractor: Send + Sync {
    /// Stable identifier, used in run metadata and logs
    fn identifier(&self) -> &str;

    /// Extraction type tag stamped on every record, e.g. `personal_data`
    fn kind(&self) -> &str;

    /// Default execution priority; higher runs earlier
    fn priority(&self) -> i32;

    /// Cheap applicability predicate, evaluated before extraction
    fn can_process(&self, document: &Document) -> bool;

    /// Extract records from document text
    ///
    /// Errors are isolated by the orchestrator: a failing extractor is
    /// recorded in run metadata and never affects other extractors or the
    /// document's survival in the batch.
    fn extract(&self, text: &str, filename: &str) -> Result<Vec<ExtractionRecord>, ExtractError>;
}

/// Trait for language model provider operations
///
/// Implemented by the infrastructure layer (`gleaner-llm`).
pub trait LlmProvider {
    /// Error type for provider operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output (if supported)
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}

/// Trait for obtaining decoded documents
///
/// A source failure for one path becomes a document-level failure in the
/// batch; it never aborts other documents.
pub trait DocumentSource {
    /// Error type for source operations
    type Error;

    /// List processable files under a directory, in deterministic order
    fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>, Self::Error>;

    /// Load and decode one document
    fn load(&self, path: &Path) -> Result<Document, Self::Error>;
}
