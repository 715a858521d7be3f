//! Personal-data extractor
//!
//! Prompts the model for the standard personal-data field set and parses
//! the reply into one record per field. Sentinel "Not found" records are
//! emitted here and dropped later by the pipeline's normalizer.

use crate::config::ExtractorConfig;
use crate::parser;
use crate::prompt::PromptBuilder;
use gleaner_domain::field::STANDARD_FIELDS;
use gleaner_domain::record::NOT_FOUND;
use gleaner_domain::traits::{ExtractError, FieldExtractor, LlmProvider};
use gleaner_domain::{Document, ExtractionRecord};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;
use tracing::{debug, warn};

/// Extraction type tag for personal data
pub const PERSONAL_DATA_KIND: &str = "personal_data";

/// Extractor identifier in run metadata and logs
pub const PERSONAL_DATA_ID: &str = "personal_data_extractor";

/// Lowercased substrings that suggest a document carries personal data
const PERSONAL_INDICATORS: [&str; 11] = [
    "name",
    "address",
    "phone",
    "email",
    "ssn",
    "social security",
    "date of birth",
    "dob",
    "employer",
    "income",
    "salary",
];

static SSN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-?\d{2}-?\d{4}$").unwrap());
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[\d\s\-()]{10,}$").unwrap());
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());
static DOB_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Extracts the standard personal-data fields from a document
pub struct PersonalDataExtractor<L> {
    provider: Arc<L>,
    config: ExtractorConfig,
}

impl<L> PersonalDataExtractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new personal-data extractor over a provider
    pub fn new(provider: Arc<L>, config: ExtractorConfig) -> Self {
        Self { provider, config }
    }

    fn parse_response(&self, response: &str) -> Vec<ExtractionRecord> {
        if let Some(parsed) = parser::find_json_object(response) {
            return self.records_from_object(&parsed);
        }

        warn!("No JSON object in personal-data reply, using line-scan fallback");
        self.records_from_lines(response)
    }

    /// Build one record per standard field from the parsed JSON object
    fn records_from_object(&self, parsed: &serde_json::Value) -> Vec<ExtractionRecord> {
        let mut records = Vec::with_capacity(STANDARD_FIELDS.len());

        for (label, key) in STANDARD_FIELDS {
            let (value, confidence) = match parsed.get(label) {
                Some(serde_json::Value::Object(entry)) => {
                    let value = entry
                        .get("value")
                        .and_then(parser::scalar_to_string)
                        .unwrap_or_else(|| NOT_FOUND.to_string());
                    let confidence = match entry.get("confidence").map(parser::confidence_from) {
                        Some(Some(c)) => c,
                        _ => {
                            warn!(field = label, "Missing or invalid confidence, using heuristic");
                            heuristic_confidence(key, &value)
                        }
                    };
                    (value, confidence)
                }
                // Bare value: the model skipped the {value, confidence} shape
                Some(other) => match parser::scalar_to_string(other) {
                    Some(value) => {
                        let confidence = heuristic_confidence(key, &value);
                        (value, confidence)
                    }
                    None => {
                        warn!(field = label, "Unusable field entry, recording as not found");
                        (NOT_FOUND.to_string(), 0.0)
                    }
                },
                None => (NOT_FOUND.to_string(), 0.0),
            };

            let value = clean_value(&value);
            records.push(ExtractionRecord::new(
                label,
                value,
                confidence,
                PERSONAL_DATA_ID,
                PERSONAL_DATA_KIND,
            ));
        }

        records
    }

    /// Fallback: scan the reply for `Label: value` lines
    fn records_from_lines(&self, response: &str) -> Vec<ExtractionRecord> {
        let mut records = Vec::with_capacity(STANDARD_FIELDS.len());

        for (label, _) in STANDARD_FIELDS {
            let pattern = RegexBuilder::new(&format!(r"{}[:\s]+([^\n]+)", regex::escape(label)))
                .case_insensitive(true)
                .build();

            let (value, confidence) = match pattern.ok().and_then(|re| {
                re.captures(response)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().trim().to_string())
            }) {
                Some(value) => (value, self.config.fallback_confidence),
                None => (NOT_FOUND.to_string(), 0.0),
            };

            let value = clean_value(&value);
            records.push(ExtractionRecord::new(
                label,
                value,
                confidence,
                PERSONAL_DATA_ID,
                PERSONAL_DATA_KIND,
            ));
        }

        records
    }
}

impl<L> FieldExtractor for PersonalDataExtractor<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    fn identifier(&self) -> &str {
        PERSONAL_DATA_ID
    }

    fn kind(&self) -> &str {
        PERSONAL_DATA_KIND
    }

    fn priority(&self) -> i32 {
        self.config.personal_priority
    }

    fn can_process(&self, document: &Document) -> bool {
        let lower = document.text.to_lowercase();
        PERSONAL_INDICATORS
            .iter()
            .any(|indicator| lower.contains(indicator))
    }

    fn extract(&self, text: &str, filename: &str) -> Result<Vec<ExtractionRecord>, ExtractError> {
        let text = truncated(text, self.config.max_text_length, filename);

        let prompt = PromptBuilder::new(text).build_personal();
        debug!(file = filename, prompt_chars = prompt.len(), "Requesting personal data");

        let response = self
            .provider
            .generate(&prompt)
            .map_err(|e| ExtractError::Llm(e.to_string()))?;

        let records = self.parse_response(&response);
        debug!(
            file = filename,
            found = records.iter().filter(|r| !r.is_sentinel()).count(),
            "Personal-data extraction complete"
        );

        Ok(records)
    }
}

/// Truncate over-long document text, logging when it happens
pub(crate) fn truncated<'a>(text: &'a str, max_len: usize, filename: &str) -> &'a str {
    if text.len() <= max_len {
        return text;
    }
    warn!(
        file = filename,
        length = text.len(),
        max = max_len,
        "Document text truncated for extraction"
    );
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Clean an extracted value: collapse whitespace, strip one layer of
/// wrapping quotes, and map empty-ish values to the sentinel
pub(crate) fn clean_value(value: &str) -> String {
    let trimmed = value.trim();
    let lower = trimmed.to_lowercase();
    if trimmed.is_empty() || matches!(lower.as_str(), "not found" | "n/a" | "none" | "null") {
        return NOT_FOUND.to_string();
    }

    let mut collapsed = WHITESPACE_RUN.replace_all(trimmed, " ").into_owned();

    if collapsed.len() >= 2 && collapsed.starts_with('"') && collapsed.ends_with('"') {
        collapsed = collapsed[1..collapsed.len() - 1].to_string();
    }

    collapsed
}

/// Format-based confidence for a bare value, keyed by canonical field key
fn heuristic_confidence(key: &str, value: &str) -> f64 {
    if value.eq_ignore_ascii_case(NOT_FOUND) {
        return 0.0;
    }

    match key {
        "socialSecurityNumber" => pattern_confidence(&SSN_PATTERN, value),
        "phoneNumber" => pattern_confidence(&PHONE_PATTERN, value),
        "emailAddress" => pattern_confidence(&EMAIL_PATTERN, value),
        "dateOfBirth" => pattern_confidence(&DOB_PATTERN, value),
        _ => {
            if value.trim().is_empty() {
                0.0
            } else {
                0.7
            }
        }
    }
}

fn pattern_confidence(pattern: &Regex, value: &str) -> f64 {
    if pattern.is_match(value.trim()) {
        0.8
    } else {
        // Value present but not in the expected shape
        0.5
    }
}
