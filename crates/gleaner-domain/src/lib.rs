//! Gleaner Domain Layer
//!
//! This crate contains the core domain model for Gleaner: the value objects
//! that flow through the extraction pipeline and the trait interfaces that
//! all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Document**: decoded text plus the filename it came from
//! - **FieldKey**: canonical camelCase identifier for a tracked field
//! - **ExtractionRecord**: one (field, value, confidence) statement produced
//!   by an extractor for one document
//! - **DocumentResult**: everything the pipeline learned about one document,
//!   including per-extractor run metadata and an optional failure marker
//!
//! ## Architecture
//!
//! - Value objects only; no I/O
//! - Trait definitions for all external interactions (extractors, language
//!   model providers, document sources)
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod document;
pub mod field;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use confidence::Confidence;
pub use document::Document;
pub use field::FieldKey;
pub use record::{DocumentResult, ExtractionRecord, ExtractorRun, RunOutcome, NOT_FOUND};
pub use traits::{DocumentSource, ExtractError, FieldExtractor, LlmProvider};
