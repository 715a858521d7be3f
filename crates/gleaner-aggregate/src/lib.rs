//! Gleaner Aggregation Engine
//!
//! Pure, deterministic cross-document aggregation: given every
//! `DocumentResult` in a batch, group field values, count occurrences,
//! compute weighted scores, detect inconsistencies, and emit a summary
//! report. Running it twice over the same input produces byte-identical
//! output.
//!
//! # Invariants
//!
//! - For any field with at least one recorded value, the weighted scores
//!   of its distinct values sum to 1.0 (± 1e-6).
//! - Values within a field sort by occurrences descending; tied runs
//!   order lexically ascending, with the run's numeric-or-currency
//!   members reordered among themselves by descending numeric value.
//! - Failed documents contribute nothing; an empty batch yields an empty
//!   report, never an error.
//!
//! # Example
//!
//! ```
//! use gleaner_aggregate::Aggregator;
//! use gleaner_domain::{DocumentResult, ExtractionRecord};
//!
//! let mut result = DocumentResult::new("doc.txt");
//! result.records.push(ExtractionRecord::new(
//!     "First name", "John", 0.9, "personal_data_extractor", "personal_data",
//! ));
//!
//! let report = Aggregator::new().aggregate(&[result]);
//! assert_eq!(report.summary.fields_with_data, 1);
//! ```

#![warn(missing_docs)]

mod aggregator;
mod numeric;
mod report;

pub use aggregator::Aggregator;
pub use numeric::parse_numeric;
pub use report::{
    AggregationReport, AggregationSummary, ConfidenceStats, FieldValueAggregate, Inconsistency,
    MostCommonValue, ValueInstance,
};
