//! Result file writer

use crate::error::OutputError;
use gleaner_aggregate::AggregationReport;
use gleaner_domain::DocumentResult;
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the cross-document aggregation file
pub const AGGREGATION_FILENAME: &str = "personal_data_aggregation.json";

/// Writes per-document result files and the aggregation file
///
/// Tracks every name claimed within the run; the stem+extension scheme is
/// injective over (stem, extension), so a collision can only mean the
/// invariant broke upstream.
pub struct OutputWriter {
    output_dir: PathBuf,
    claimed: HashSet<String>,
}

impl OutputWriter {
    /// Create a writer, creating the output directory if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, OutputError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir, claimed: HashSet::new() })
    }

    /// The directory this writer targets
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Collision-safe result name for a source filename
    ///
    /// `loan.pdf` → `loan_pdf_results.json`; extensionless `data` →
    /// `data_results.json`.
    pub fn result_filename(source: &str) -> String {
        let path = Path::new(source);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(source);
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}_{}_results.json", stem, ext),
            None => format!("{}_results.json", stem),
        }
    }

    /// Write one document's result file
    pub fn write_document_result(
        &mut self,
        result: &DocumentResult,
    ) -> Result<PathBuf, OutputError> {
        let name = Self::result_filename(&result.filename);
        if !self.claimed.insert(name.clone()) {
            return Err(OutputError::DuplicateOutputName(name));
        }

        // Records grouped by extraction type tag, deterministic key order
        let mut by_kind: BTreeMap<&str, Vec<&gleaner_domain::ExtractionRecord>> = BTreeMap::new();
        for record in &result.records {
            by_kind.entry(record.kind.as_str()).or_default().push(record);
        }

        let payload = json!({
            "filename": result.filename,
            "processed_at": result.processed_at,
            "failure": result.failure,
            "results": by_kind,
            "extraction_metadata": {
                "success_count": result.success_count(),
                "error_count": result.error_count(),
                "total_duration_ms": result.total_duration_ms(),
                "extractors_run": result.runs,
            },
        });

        let path = self.output_dir.join(&name);
        fs::write(&path, serde_json::to_string_pretty(&payload)?)?;
        info!(file = %path.display(), "Wrote document result");
        Ok(path)
    }

    /// Write the cross-document aggregation file
    ///
    /// Independent of the per-document files and written once per run,
    /// after the batch barrier.
    pub fn write_aggregation(&self, report: &AggregationReport) -> Result<PathBuf, OutputError> {
        let path = self.output_dir.join(AGGREGATION_FILENAME);
        fs::write(&path, serde_json::to_string_pretty(report)?)?;
        info!(file = %path.display(), "Wrote aggregation report");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_aggregate::Aggregator;
    use gleaner_domain::record::{ExtractorRun, RunOutcome};
    use gleaner_domain::ExtractionRecord;

    fn sample_result(filename: &str) -> DocumentResult {
        let mut result = DocumentResult::new(filename);
        result.records.push(ExtractionRecord::new(
            "First name",
            "John",
            0.9,
            "personal_data_extractor",
            "personal_data",
        ));
        result.records.push(ExtractionRecord::new(
            "Amount",
            "5000",
            0.8,
            "tabular_data_extractor",
            "tabular_data",
        ));
        result.runs.push(ExtractorRun {
            extractor: "personal_data_extractor".into(),
            kind: "personal_data".into(),
            outcome: RunOutcome::Completed { records: 12 },
            duration_ms: 40,
        });
        result
    }

    #[test]
    fn test_result_filename_embeds_extension() {
        assert_eq!(OutputWriter::result_filename("loan.pdf"), "loan_pdf_results.json");
        assert_eq!(OutputWriter::result_filename("loan.txt"), "loan_txt_results.json");
        assert_eq!(OutputWriter::result_filename("data"), "data_results.json");
        assert_eq!(
            OutputWriter::result_filename("file.with.dots.csv"),
            "file.with.dots_csv_results.json"
        );
    }

    #[test]
    fn test_equal_stems_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = OutputWriter::new(dir.path()).unwrap();

        let a = writer.write_document_result(&sample_result("document.pdf")).unwrap();
        let b = writer.write_document_result(&sample_result("document.txt")).unwrap();
        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn test_duplicate_name_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = OutputWriter::new(dir.path()).unwrap();

        writer.write_document_result(&sample_result("loan.txt")).unwrap();
        let result = writer.write_document_result(&sample_result("loan.txt"));
        assert!(matches!(result, Err(OutputError::DuplicateOutputName(_))));
    }

    #[test]
    fn test_document_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = OutputWriter::new(dir.path()).unwrap();

        let path = writer.write_document_result(&sample_result("loan.txt")).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(parsed["filename"], "loan.txt");
        assert_eq!(parsed["results"]["personal_data"][0]["value"], "John");
        assert_eq!(parsed["results"]["tabular_data"][0]["value"], "5000");
        assert_eq!(parsed["extraction_metadata"]["success_count"], 1);
        assert_eq!(parsed["extraction_metadata"]["error_count"], 0);
        assert_eq!(
            parsed["extraction_metadata"]["extractors_run"][0]["status"],
            "completed"
        );
        assert!(parsed["failure"].is_null());
    }

    #[test]
    fn test_failed_document_json_carries_marker() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = OutputWriter::new(dir.path()).unwrap();

        let failed = DocumentResult::failed("scan.pdf", "unsupported format: pdf");
        let path = writer.write_document_result(&failed).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(parsed["failure"], "unsupported format: pdf");
        assert_eq!(parsed["extraction_metadata"]["success_count"], 0);
    }

    #[test]
    fn test_aggregation_file_is_stable_across_reruns() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path()).unwrap();

        let batch = vec![sample_result("a.txt"), sample_result("b.txt")];
        let report = Aggregator::new().aggregate(&batch);

        let path = writer.write_aggregation(&report).unwrap();
        assert_eq!(path.file_name().unwrap(), AGGREGATION_FILENAME);
        let first = fs::read(&path).unwrap();

        writer.write_aggregation(&report).unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
    }
}
