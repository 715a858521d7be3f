//! Cross-document aggregation
//!
//! A pure function over the batch's `DocumentResult`s. Input order is
//! canonicalized (sorted by filename) and every map is ordered, so the
//! produced report carries no iteration-order dependency.

use crate::numeric::parse_numeric;
use crate::report::{
    AggregationReport, AggregationSummary, ConfidenceStats, FieldValueAggregate, Inconsistency,
    MostCommonValue, ValueInstance,
};
use gleaner_domain::DocumentResult;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Aggregates field values across a completed batch
#[derive(Debug, Default)]
pub struct Aggregator;

impl Aggregator {
    /// Create an aggregator
    pub fn new() -> Self {
        Self
    }

    /// Build the aggregation report for a batch
    ///
    /// Failed documents contribute nothing. An empty or all-failed batch
    /// produces a report with empty collections and zero counters.
    pub fn aggregate(&self, results: &[DocumentResult]) -> AggregationReport {
        // Canonical input order: sorted by filename, failed documents out
        let mut contributing: Vec<&DocumentResult> =
            results.iter().filter(|r| !r.is_failed()).collect();
        contributing.sort_by(|a, b| a.filename.cmp(&b.filename));

        debug!(
            total = results.len(),
            contributing = contributing.len(),
            "Aggregating batch"
        );

        // field key → value → supporting instances, in canonical order
        let mut grouped: BTreeMap<String, BTreeMap<String, Vec<ValueInstance>>> = BTreeMap::new();
        for result in &contributing {
            for record in &result.records {
                grouped
                    .entry(record.field.as_str().to_string())
                    .or_default()
                    .entry(record.value.clone())
                    .or_default()
                    .push(ValueInstance {
                        file: result.filename.clone(),
                        confidence: record.confidence.value(),
                    });
            }
        }

        let mut aggregated_data: BTreeMap<String, Vec<FieldValueAggregate>> = BTreeMap::new();
        let mut inconsistencies_found = Vec::new();
        let mut most_common_values = BTreeMap::new();
        let mut confidence_analysis = BTreeMap::new();

        for (field, values) in grouped {
            let total_instances: usize = values.values().map(Vec::len).sum();

            let mut aggregates: Vec<FieldValueAggregate> = values
                .into_iter()
                .map(|(value, instances)| {
                    let occurrences = instances.len();
                    FieldValueAggregate {
                        value,
                        instances,
                        occurrences,
                        // Unrounded, so scores sum to 1.0 per field
                        weighted_score: occurrences as f64 / total_instances as f64,
                    }
                })
                .collect();

            sort_field_values(&mut aggregates);

            let all_confidences: Vec<f64> = aggregates
                .iter()
                .flat_map(|a| a.instances.iter().map(|i| i.confidence))
                .collect();
            confidence_analysis.insert(
                field.clone(),
                ConfidenceStats {
                    average_confidence: all_confidences.iter().sum::<f64>()
                        / all_confidences.len() as f64,
                    min_confidence: all_confidences.iter().copied().fold(f64::INFINITY, f64::min),
                    max_confidence: all_confidences
                        .iter()
                        .copied()
                        .fold(f64::NEG_INFINITY, f64::max),
                    total_instances: all_confidences.len(),
                },
            );

            if aggregates.len() > 1 {
                inconsistencies_found.push(Inconsistency {
                    field: field.clone(),
                    value_count: aggregates.len(),
                    values: aggregates.iter().map(|a| a.value.clone()).collect(),
                });
            }

            // Head of the sorted list; fields only exist here with ≥ 1 value
            if let Some(head) = aggregates.first() {
                most_common_values.insert(
                    field.clone(),
                    MostCommonValue {
                        value: head.value.clone(),
                        occurrences: head.occurrences,
                        weighted_score: head.weighted_score,
                    },
                );
            }

            aggregated_data.insert(field, aggregates);
        }

        let summary = AggregationSummary {
            documents_processed: contributing.len(),
            fields_with_data: aggregated_data.len(),
            total_unique_values: aggregated_data.values().map(Vec::len).sum(),
            inconsistencies_found,
            most_common_values,
            confidence_analysis,
        };

        info!(
            fields = summary.fields_with_data,
            unique_values = summary.total_unique_values,
            inconsistencies = summary.inconsistencies_found.len(),
            "Aggregation complete"
        );

        AggregationReport { aggregated_data, summary }
    }
}

/// Sort policy within one field's value list
///
/// Occurrences descending. Each tied run orders lexically ascending, then
/// the run's numeric-or-currency members reorder among themselves by
/// descending numeric value, filling the slots numerics held in the
/// lexical order. Two numerics therefore come out numeric-descending and
/// all other pairs lexical; a value whose numeric parse fails keeps its
/// lexical slot. The arrangement is total over arbitrary tied runs.
fn sort_field_values(aggregates: &mut [FieldValueAggregate]) {
    aggregates.sort_by(|a, b| {
        b.occurrences.cmp(&a.occurrences).then_with(|| a.value.cmp(&b.value))
    });

    let mut start = 0;
    while start < aggregates.len() {
        let mut end = start + 1;
        while end < aggregates.len() && aggregates[end].occurrences == aggregates[start].occurrences
        {
            end += 1;
        }
        reorder_numerics_descending(&mut aggregates[start..end]);
        start = end;
    }
}

/// Reorder the numeric members of one tied run by descending value,
/// leaving non-numeric members in place. Equal numeric values keep their
/// lexical order (the sort is stable).
fn reorder_numerics_descending(run: &mut [FieldValueAggregate]) {
    let mut numeric: Vec<(usize, f64)> = run
        .iter()
        .enumerate()
        .filter_map(|(slot, aggregate)| parse_numeric(&aggregate.value).map(|n| (slot, n)))
        .collect();
    if numeric.len() < 2 {
        return;
    }

    let slots: Vec<usize> = numeric.iter().map(|(slot, _)| *slot).collect();
    numeric.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let reordered: Vec<FieldValueAggregate> =
        numeric.iter().map(|(slot, _)| run[*slot].clone()).collect();
    for (slot, aggregate) in slots.into_iter().zip(reordered) {
        run[slot] = aggregate;
    }
}
