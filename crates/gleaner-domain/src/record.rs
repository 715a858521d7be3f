//! Extraction records and per-document results

use crate::confidence::Confidence;
use crate::field::FieldKey;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Sentinel value an extractor reports when a field is absent
///
/// Records carrying this value (any letter case) are dropped by the
/// normalizer before they reach a [`DocumentResult`].
pub const NOT_FOUND: &str = "Not found";

/// Check whether a value is the "not found" sentinel, ignoring case
pub fn is_not_found(value: &str) -> bool {
    value.eq_ignore_ascii_case(NOT_FOUND)
}

/// One extracted statement: this document says `field` has `value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Canonical field key
    pub field: FieldKey,

    /// Extracted value, verbatim after cleaning
    pub value: String,

    /// Extractor-reported confidence
    pub confidence: Confidence,

    /// Identifier of the extractor that produced this record
    pub extractor: String,

    /// Extraction type tag, e.g. `personal_data`
    pub kind: String,
}

impl ExtractionRecord {
    /// Build a record, canonicalizing the field label and clamping confidence
    pub fn new(
        label: &str,
        value: impl Into<String>,
        confidence: f64,
        extractor: &str,
        kind: &str,
    ) -> Self {
        Self {
            field: FieldKey::from_label(label),
            value: value.into(),
            confidence: Confidence::new(confidence),
            extractor: extractor.to_string(),
            kind: kind.to_string(),
        }
    }

    /// True when the value is the "not found" sentinel
    pub fn is_sentinel(&self) -> bool {
        is_not_found(&self.value)
    }
}

/// Outcome of one extractor run against one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The extractor ran and returned records (possibly zero)
    Completed {
        /// Number of records produced, counted before normalization
        records: usize,
    },
    /// The extractor ran and failed; other extractors are unaffected
    Failed {
        /// Error text as reported by the extractor
        error: String,
    },
    /// The applicability predicate declined the document
    Skipped,
}

impl RunOutcome {
    /// True for [`RunOutcome::Completed`]
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    /// True for [`RunOutcome::Failed`]
    pub fn is_failure(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Metadata for one extractor's run against one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorRun {
    /// Extractor identifier
    pub extractor: String,

    /// Extraction type tag
    pub kind: String,

    /// What happened
    #[serde(flatten)]
    pub outcome: RunOutcome,

    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

/// Everything the pipeline learned about one document
///
/// A result exists for every document in the batch, including documents
/// whose text could not be obtained; those carry a `failure` marker and no
/// records, and are excluded from aggregation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Source filename
    pub filename: String,

    /// Normalized records in execution order
    pub records: Vec<ExtractionRecord>,

    /// Per-extractor run metadata in execution order
    pub runs: Vec<ExtractorRun>,

    /// Document-level failure, set when no extraction could be attempted
    pub failure: Option<String>,

    /// Seconds since the Unix epoch when processing finished
    pub processed_at: u64,
}

impl DocumentResult {
    /// Create an empty result for a document about to be processed
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            records: Vec::new(),
            runs: Vec::new(),
            failure: None,
            processed_at: unix_timestamp(),
        }
    }

    /// Create a result for a document that could not be processed at all
    pub fn failed(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            records: Vec::new(),
            runs: Vec::new(),
            failure: Some(reason.into()),
            processed_at: unix_timestamp(),
        }
    }

    /// True when a document-level failure marker is set
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Number of extractor runs that completed
    pub fn success_count(&self) -> usize {
        self.runs.iter().filter(|r| r.outcome.is_success()).count()
    }

    /// Number of extractor runs that failed
    pub fn error_count(&self) -> usize {
        self.runs.iter().filter(|r| r.outcome.is_failure()).count()
    }

    /// Total wall-clock time spent in extractors, in milliseconds
    pub fn total_duration_ms(&self) -> u64 {
        self.runs.iter().map(|r| r.duration_ms).sum()
    }
}

/// Current time as seconds since the Unix epoch
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
