//! Gleaner Extraction Pipeline
//!
//! Orchestrates pluggable field extractors over documents and runs batches
//! with bounded concurrency.
//!
//! # Architecture
//!
//! ```text
//! paths → FsDocumentSource → Orchestrator (per document) → DocumentResult
//!                             ├ applicability filter
//!                             ├ priority-ordered extractor runs
//!                             ├ failure isolation per extractor
//!                             └ Normalizer (sentinel filtering)
//! ```
//!
//! The [`BatchRunner`] processes documents as independent tasks behind a
//! semaphore and joins them at a barrier; aggregation only ever sees a
//! completed batch. A failing extractor, a failing document load, or a
//! panicking document task each degrade to metadata on that document's
//! result without touching sibling work.

#![warn(missing_docs)]

mod batch;
mod error;
mod normalizer;
mod orchestrator;
mod source;

pub use batch::BatchRunner;
pub use error::{PipelineError, SourceError};
pub use normalizer::Normalizer;
pub use orchestrator::Orchestrator;
pub use source::{FsDocumentSource, SUPPORTED_EXTENSIONS};
