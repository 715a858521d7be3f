//! Gleaner Output Layer
//!
//! Persists one collision-safe JSON result file per document plus a single
//! aggregation file, and enforces the permitted-root contract for any
//! read-back capability (the read-only viewer consumes these files).
//!
//! # Naming
//!
//! The per-document name embeds the source extension so two documents with
//! the same stem never overwrite each other: `loan.pdf` →
//! `loan_pdf_results.json`, `loan.txt` → `loan_txt_results.json`. A
//! duplicate name within one run indicates a broken naming invariant and
//! is a fatal error, never a silent overwrite.

#![warn(missing_docs)]

mod access;
mod error;
mod writer;

pub use access::PermittedRoot;
pub use error::{AccessError, OutputError};
pub use writer::{OutputWriter, AGGREGATION_FILENAME};
