//! Gleaner Extractors
//!
//! Concrete `FieldExtractor` implementations that turn document text into
//! field/value/confidence records by prompting a language model and parsing
//! its reply.
//!
//! # Architecture
//!
//! ```text
//! Document text → PromptBuilder → LlmProvider → parser → ExtractionRecords
//! ```
//!
//! Each extractor is generic over the provider so tests can run against
//! `MockProvider` while production uses `OllamaProvider`. The extractors are
//! registered with the pipeline orchestrator as trait objects; failure in
//! one never affects the others.
//!
//! # Extractors
//!
//! - [`PersonalDataExtractor`]: the standard personal-data field set
//!   (names, contact details, employment, income)
//! - [`TabularDataExtractor`]: tables and structured data areas, flattened
//!   to header-keyed records
//!
//! # Example
//!
//! ```
//! use gleaner_domain::traits::FieldExtractor;
//! use gleaner_extractors::{ExtractorConfig, PersonalDataExtractor};
//! use gleaner_llm::MockProvider;
//! use std::sync::Arc;
//!
//! let llm = Arc::new(MockProvider::new(
//!     r#"{"First name": {"value": "John", "confidence": 0.9}}"#,
//! ));
//! let extractor = PersonalDataExtractor::new(llm, ExtractorConfig::default());
//! let records = extractor.extract("Name: John Smith", "app.txt").unwrap();
//! assert!(records.iter().any(|r| r.value == "John"));
//! ```

#![warn(missing_docs)]

mod config;
mod parser;
mod personal;
mod prompt;
mod tabular;


pub use config::ExtractorConfig;
pub use personal::PersonalDataExtractor;
pub use prompt::PromptBuilder;
pub use tabular::TabularDataExtractor;
