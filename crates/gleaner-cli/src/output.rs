//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use gleaner_aggregate::AggregationReport;
use gleaner_domain::DocumentResult;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// What one batch run accomplished, for terminal display.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    /// Documents that produced a result (including failed ones)
    pub documents_total: usize,
    /// Documents with a document-level failure marker
    pub documents_failed: usize,
    /// Extractor runs that completed
    pub extractor_successes: usize,
    /// Extractor runs that failed
    pub extractor_errors: usize,
    /// Fields with at least one aggregated value
    pub fields_with_data: usize,
    /// Fields with conflicting values across documents
    pub inconsistencies_found: usize,
    /// Where the result files were written
    pub output_dir: String,
}

impl BatchSummary {
    /// Build a summary from the batch results and the aggregation report.
    pub fn from_batch(
        results: &[DocumentResult],
        report: &AggregationReport,
        output_dir: &str,
    ) -> Self {
        Self {
            documents_total: results.len(),
            documents_failed: results.iter().filter(|r| r.is_failed()).count(),
            extractor_successes: results.iter().map(|r| r.success_count()).sum(),
            extractor_errors: results.iter().map(|r| r.error_count()).sum(),
            fields_with_data: report.summary.fields_with_data,
            inconsistencies_found: report.summary.inconsistencies_found.len(),
            output_dir: output_dir.to_string(),
        }
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the batch summary.
    pub fn format_summary(&self, summary: &BatchSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Table => Ok(self.format_summary_table(summary)),
            OutputFormat::Quiet => Ok(format!(
                "{} {}",
                summary.documents_total - summary.documents_failed,
                summary.documents_failed
            )),
        }
    }

    fn format_summary_table(&self, summary: &BatchSummary) -> String {
        let processed = summary.documents_total - summary.documents_failed;

        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        builder.push_record(["Documents processed", &processed.to_string()]);
        builder.push_record(["Documents failed", &summary.documents_failed.to_string()]);
        builder.push_record(["Extractor successes", &summary.extractor_successes.to_string()]);
        builder.push_record(["Extractor errors", &summary.extractor_errors.to_string()]);
        builder.push_record(["Fields with data", &summary.fields_with_data.to_string()]);
        builder.push_record(["Inconsistent fields", &summary.inconsistencies_found.to_string()]);
        builder.push_record(["Output directory", &summary.output_dir]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut out = table.to_string();
        if summary.documents_failed > 0 {
            out.push('\n');
            out.push_str(&self.warning(&format!(
                "{} document(s) failed; see their result files for details",
                summary.documents_failed
            )));
        }
        out
    }

    /// Format a JSON document for display.
    pub fn format_json(&self, value: &serde_json::Value) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(serde_json::to_string(value)?),
            _ => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_aggregate::Aggregator;
    use gleaner_domain::ExtractionRecord;

    fn sample_summary() -> BatchSummary {
        let mut ok = DocumentResult::new("a.txt");
        ok.records.push(ExtractionRecord::new(
            "First name",
            "John",
            0.9,
            "personal_data_extractor",
            "personal_data",
        ));
        let failed = DocumentResult::failed("b.pdf", "unsupported format: pdf");
        let results = vec![ok, failed];
        let report = Aggregator::new().aggregate(&results);
        BatchSummary::from_batch(&results, &report, "extraction_results")
    }

    #[test]
    fn test_summary_counters() {
        let summary = sample_summary();
        assert_eq!(summary.documents_total, 2);
        assert_eq!(summary.documents_failed, 1);
        assert_eq!(summary.fields_with_data, 1);
        assert_eq!(summary.inconsistencies_found, 0);
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_summary(&sample_summary()).unwrap();
        assert!(output.contains("Documents processed"));
        assert!(output.contains("Inconsistent fields"));
        assert!(output.contains("failed"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_summary(&sample_summary()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["documents_total"], 2);
        assert_eq!(parsed["documents_failed"], 1);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_summary(&sample_summary()).unwrap();
        assert_eq!(output, "1 1");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
