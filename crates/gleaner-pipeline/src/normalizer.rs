//! Field value normalization
//!
//! Label-to-key canonicalization happens when an [`ExtractionRecord`] is
//! constructed; what remains here is the sentinel filter that keeps
//! "Not found" placeholders out of results and aggregation input.

use gleaner_domain::ExtractionRecord;
use tracing::debug;

/// Drops sentinel records before they reach a `DocumentResult`
pub struct Normalizer;

impl Normalizer {
    /// Filter out records whose value is the "not found" sentinel
    /// (any letter case), preserving order of the rest
    pub fn apply(records: Vec<ExtractionRecord>) -> Vec<ExtractionRecord> {
        let before = records.len();
        let kept: Vec<ExtractionRecord> =
            records.into_iter().filter(|r| !r.is_sentinel()).collect();
        if kept.len() < before {
            debug!(dropped = before - kept.len(), "Dropped sentinel records");
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(field: &str, value: &str) -> ExtractionRecord {
        ExtractionRecord::new(field, value, 0.8, "test_extractor", "personal_data")
    }

    #[test]
    fn test_drops_sentinels_any_case() {
        let records = vec![
            record("First name", "John"),
            record("Last name", "Not found"),
            record("Middle name", "NOT FOUND"),
            record("Phone number", "not found"),
            record("Email address", "john@example.com"),
        ];

        let kept = Normalizer::apply(records);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].value, "John");
        assert_eq!(kept[1].value, "john@example.com");
    }

    #[test]
    fn test_keeps_near_sentinel_values() {
        let records = vec![record("Home address", "Not found at this address")];
        assert_eq!(Normalizer::apply(records).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(Normalizer::apply(Vec::new()).is_empty());
    }
}
