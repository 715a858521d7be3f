//! Tabular-data extractor
//!
//! Finds tables in document text via the model and flattens each data row
//! into header-keyed records, so tabular values aggregate through the same
//! field/value machinery as everything else.

use crate::config::ExtractorConfig;
use crate::parser;
use crate::personal::clean_value;
use crate::prompt::PromptBuilder;
use gleaner_domain::traits::{ExtractError, FieldExtractor, LlmProvider};
use gleaner_domain::{Document, ExtractionRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Extraction type tag for tabular data
pub const TABULAR_DATA_KIND: &str = "tabular_data";

/// Extractor identifier in run metadata and logs
pub const TABULAR_DATA_ID: &str = "tabular_data_extractor";

/// Structural markers that suggest a table without CSV or aligned columns
const TABLE_INDICATORS: [&str; 10] = [
    "|", "+-", "===", "---", "table", "column", "row", "header", "\t", "    ",
];

/// dataType classifications the prompt asks for
const KNOWN_DATA_TYPES: [&str; 8] = [
    "financial_data",
    "contact_list",
    "transaction_history",
    "employment_records",
    "asset_inventory",
    "schedule_data",
    "inventory_data",
    "unknown",
];

static ALIGNED_COLUMNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+\s{2,}\w+\s{2,}\w+").unwrap());

/// Extracts tabular data from a document and flattens it to records
pub struct TabularDataExtractor<L> {
    provider: Arc<L>,
    config: ExtractorConfig,
}

impl<L> TabularDataExtractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new tabular-data extractor over a provider
    pub fn new(provider: Arc<L>, config: ExtractorConfig) -> Self {
        Self { provider, config }
    }

    /// Flatten the parsed table array into records
    fn records_from_tables(&self, tables: &[serde_json::Value]) -> Vec<ExtractionRecord> {
        let mut records = Vec::new();

        for (idx, table) in tables.iter().enumerate() {
            let Some(obj) = table.as_object() else {
                warn!(table = idx, "Skipping non-object table entry");
                continue;
            };

            let data_type = normalize_data_type(
                obj.get("dataType").and_then(|v| v.as_str()).unwrap_or("unknown"),
            );

            let headers: Vec<String> = obj
                .get("headers")
                .and_then(|v| v.as_array())
                .map(|arr| arr.iter().filter_map(parser::scalar_to_string).collect())
                .unwrap_or_default();

            let rows: Vec<&Vec<serde_json::Value>> = obj
                .get("data")
                .and_then(|v| v.as_array())
                .map(|arr| arr.iter().filter_map(|row| row.as_array()).collect())
                .unwrap_or_default();

            if headers.is_empty() || rows.is_empty() {
                warn!(table = idx, data_type = %data_type, "Skipping empty table");
                continue;
            }

            let confidence = obj
                .get("confidence")
                .and_then(parser::confidence_from)
                .unwrap_or(0.0);

            debug!(
                table = idx,
                data_type = %data_type,
                rows = rows.len(),
                columns = headers.len(),
                "Flattening table"
            );

            for row in rows {
                for (header, cell) in headers.iter().zip(row.iter()) {
                    let Some(cell_text) = parser::scalar_to_string(cell) else {
                        continue;
                    };
                    records.push(ExtractionRecord::new(
                        header,
                        clean_value(&cell_text),
                        confidence,
                        TABULAR_DATA_ID,
                        TABULAR_DATA_KIND,
                    ));
                }
            }
        }

        records
    }
}

impl<L> FieldExtractor for TabularDataExtractor<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    fn identifier(&self) -> &str {
        TABULAR_DATA_ID
    }

    fn kind(&self) -> &str {
        TABULAR_DATA_KIND
    }

    fn priority(&self) -> i32 {
        self.config.tabular_priority
    }

    fn can_process(&self, document: &Document) -> bool {
        let lines: Vec<&str> = document.text.lines().collect();

        let csv_like = lines
            .iter()
            .take(20)
            .filter(|line| line.matches(',').count() >= 2 && line.split(',').count() >= 3)
            .count();
        if csv_like >= 3 {
            return true;
        }

        let aligned = lines
            .iter()
            .take(30)
            .filter(|line| ALIGNED_COLUMNS.is_match(line))
            .count();
        if aligned >= 3 {
            return true;
        }

        TABLE_INDICATORS
            .iter()
            .any(|indicator| document.text.contains(indicator))
    }

    fn extract(&self, text: &str, filename: &str) -> Result<Vec<ExtractionRecord>, ExtractError> {
        let text = crate::personal::truncated(text, self.config.max_text_length, filename);

        let prompt = PromptBuilder::new(text).build_tabular();
        debug!(file = filename, prompt_chars = prompt.len(), "Requesting tabular data");

        let response = self
            .provider
            .generate(&prompt)
            .map_err(|e| ExtractError::Llm(e.to_string()))?;

        // No fallback here: a reply without a JSON array is a failed run
        let parsed = parser::find_json_array(&response).ok_or_else(|| {
            ExtractError::InvalidResponse("no JSON array in tabular-data reply".to_string())
        })?;

        let tables = parsed
            .as_array()
            .cloned()
            .unwrap_or_default();

        let records = self.records_from_tables(&tables);
        debug!(file = filename, records = records.len(), "Tabular extraction complete");

        Ok(records)
    }
}

/// Normalize a dataType label to the known classification set
///
/// Exact match after lowercasing and space-to-underscore conversion, then
/// partial match in either direction, else "unknown".
fn normalize_data_type(data_type: &str) -> String {
    let normalized = data_type.to_lowercase().replace(' ', "_");

    if KNOWN_DATA_TYPES.contains(&normalized.as_str()) {
        return normalized;
    }

    for known in KNOWN_DATA_TYPES {
        if !normalized.is_empty() && (known.contains(&normalized) || normalized.contains(known)) {
            return known.to_string();
        }
    }

    "unknown".to_string()
}
