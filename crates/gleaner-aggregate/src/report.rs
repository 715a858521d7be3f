//! Aggregation report shapes
//!
//! These types serialize directly into the aggregation output file. Field
//! maps are `BTreeMap`s so serialization order is deterministic; nothing
//! here carries a timestamp, so re-running aggregation over unchanged
//! input reproduces the file byte for byte.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One occurrence of a value, attributed to one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueInstance {
    /// Source document filename
    pub file: String,

    /// Confidence the extractor reported for this occurrence
    pub confidence: f64,
}

/// All support for one distinct value of one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValueAggregate {
    /// The value, verbatim
    pub value: String,

    /// Supporting instances in canonical input order
    pub instances: Vec<ValueInstance>,

    /// Instance count
    pub occurrences: usize,

    /// occurrences / total instances recorded for the field
    #[serde(rename = "weightedScore")]
    pub weighted_score: f64,
}

/// A field observed with two or more distinct values across the batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inconsistency {
    /// Canonical field key
    pub field: String,

    /// Number of distinct values
    pub value_count: usize,

    /// Every distinct value, in the field's sorted order
    pub values: Vec<String>,
}

/// The head of a field's sorted value list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostCommonValue {
    /// The most common value
    pub value: String,

    /// Its occurrence count
    pub occurrences: usize,

    /// Its weighted score
    #[serde(rename = "weightedScore")]
    pub weighted_score: f64,
}

/// Confidence statistics across every instance recorded for a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceStats {
    /// Mean confidence
    pub average_confidence: f64,

    /// Lowest confidence
    pub min_confidence: f64,

    /// Highest confidence
    pub max_confidence: f64,

    /// Number of instances
    pub total_instances: usize,
}

/// Summary block of an aggregation report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationSummary {
    /// Documents that contributed records (failed documents excluded)
    pub documents_processed: usize,

    /// Fields with at least one recorded value
    pub fields_with_data: usize,

    /// Sum of distinct-value counts across all fields
    pub total_unique_values: usize,

    /// Every field with conflicting values
    pub inconsistencies_found: Vec<Inconsistency>,

    /// Per field, the head of its sorted value list
    pub most_common_values: BTreeMap<String, MostCommonValue>,

    /// Per field, confidence statistics over all instances
    pub confidence_analysis: BTreeMap<String, ConfidenceStats>,
}

/// Full cross-document aggregation report
///
/// Recomputed from scratch from the batch's `DocumentResult`s on every
/// run; never updated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationReport {
    /// Field key → sorted distinct values with their support
    pub aggregated_data: BTreeMap<String, Vec<FieldValueAggregate>>,

    /// Summary counters and findings
    pub summary: AggregationSummary,
}
