//! End-to-end integration tests for the extraction pipeline
//!
//! These tests run the full flow against a mock provider: discover documents
//! from a directory, extract, aggregate, and write result files, then check
//! the files against the contracts the pieces promise each other.

use gleaner_aggregate::Aggregator;
use gleaner_domain::traits::DocumentSource;
use gleaner_extractors::{ExtractorConfig, PersonalDataExtractor, TabularDataExtractor};
use gleaner_llm::MockProvider;
use gleaner_output::{OutputWriter, PermittedRoot, AGGREGATION_FILENAME};
use gleaner_pipeline::{BatchRunner, FsDocumentSource, Orchestrator};
use std::fs;
use std::sync::Arc;

const DOC_ONE: &str = "\
Loan Application
Applicant Name: John Smith
Email: john@example.com
Annual income: $85,000
";

const DOC_TWO: &str = "\
Account Review
Customer Name: John Smith
Email: j.smith@example.com
";

fn personal_reply(first: &str, email: &str) -> String {
    format!(
        r#"{{
            "First name": {{"value": "{}", "confidence": 0.9}},
            "Email address": {{"value": "{}", "confidence": 0.85}}
        }}"#,
        first, email
    )
}

fn scripted_provider() -> Arc<MockProvider> {
    let mut provider = MockProvider::new("{}");
    provider.add_response_containing("Applicant Name: John Smith", &personal_reply("John", "john@example.com"));
    provider.add_response_containing("Customer Name: John Smith", &personal_reply("John", "j.smith@example.com"));
    Arc::new(provider)
}

fn orchestrator_with(provider: Arc<MockProvider>) -> Orchestrator {
    let mut orchestrator = Orchestrator::new();
    orchestrator.register(Arc::new(PersonalDataExtractor::new(
        Arc::clone(&provider),
        ExtractorConfig::default(),
    )));
    orchestrator.register(Arc::new(TabularDataExtractor::new(
        provider,
        ExtractorConfig::default(),
    )));
    orchestrator
}

#[tokio::test]
async fn test_full_pipeline_to_files() {
    let input = tempfile::tempdir().unwrap();
    fs::write(input.path().join("application.txt"), DOC_ONE).unwrap();
    fs::write(input.path().join("review.txt"), DOC_TWO).unwrap();
    fs::write(input.path().join("scan.pdf"), b"%PDF-1.4").unwrap();

    let source = Arc::new(FsDocumentSource::new());
    let paths = source.discover(input.path()).unwrap();
    assert_eq!(paths.len(), 3);

    let runner = BatchRunner::new(orchestrator_with(scripted_provider()), 2);
    let results = runner.run(source, paths).await.unwrap();
    assert_eq!(results.len(), 3);

    // The binary document occupies a slot as a failure
    let scan = results.iter().find(|r| r.filename == "scan.pdf").unwrap();
    assert!(scan.is_failed());

    let output = tempfile::tempdir().unwrap();
    let mut writer = OutputWriter::new(output.path()).unwrap();
    for result in &results {
        writer.write_document_result(result).unwrap();
    }

    let report = Aggregator::new().aggregate(&results);
    writer.write_aggregation(&report).unwrap();

    assert!(output.path().join("application_txt_results.json").exists());
    assert!(output.path().join("review_txt_results.json").exists());
    assert!(output.path().join("scan_pdf_results.json").exists());
    assert!(output.path().join(AGGREGATION_FILENAME).exists());

    let aggregation: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(output.path().join(AGGREGATION_FILENAME)).unwrap(),
    )
    .unwrap();

    // firstName agrees across documents, emailAddress does not
    let first_name = &aggregation["aggregated_data"]["firstName"];
    assert_eq!(first_name[0]["value"], "John");
    assert_eq!(first_name[0]["occurrences"], 2);
    assert_eq!(first_name[0]["weightedScore"], 1.0);

    let email = &aggregation["aggregated_data"]["emailAddress"];
    assert_eq!(email.as_array().unwrap().len(), 2);

    let inconsistencies = aggregation["summary"]["inconsistencies_found"]
        .as_array()
        .unwrap();
    assert!(inconsistencies.iter().any(|i| i["field"] == "emailAddress"));
    assert!(inconsistencies.iter().all(|i| i["field"] != "firstName"));

    // Failed documents are excluded from aggregation input
    assert_eq!(aggregation["summary"]["documents_processed"], 2);
}

#[tokio::test]
async fn test_rerun_produces_identical_aggregation() {
    let input = tempfile::tempdir().unwrap();
    fs::write(input.path().join("application.txt"), DOC_ONE).unwrap();
    fs::write(input.path().join("review.txt"), DOC_TWO).unwrap();

    let mut files = Vec::new();
    for _ in 0..2 {
        let source = Arc::new(FsDocumentSource::new());
        let paths = source.discover(input.path()).unwrap();
        let runner = BatchRunner::new(orchestrator_with(scripted_provider()), 4);
        let results = runner.run(source, paths).await.unwrap();

        let output = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(output.path()).unwrap();
        let report = Aggregator::new().aggregate(&results);
        let path = writer.write_aggregation(&report).unwrap();
        files.push(fs::read(path).unwrap());
    }

    assert_eq!(files[0], files[1]);
}

#[tokio::test]
async fn test_extractor_failure_does_not_sink_document() {
    let input = tempfile::tempdir().unwrap();
    fs::write(input.path().join("application.txt"), DOC_ONE).unwrap();

    // Personal prompt errors; tabular returns nothing to extract
    let mut provider = MockProvider::new("[]");
    provider.add_error_containing("personal details");
    let provider = Arc::new(provider);

    let source = Arc::new(FsDocumentSource::new());
    let paths = source.discover(input.path()).unwrap();
    let runner = BatchRunner::new(orchestrator_with(provider), 1);
    let results = runner.run(source, paths).await.unwrap();

    let result = &results[0];
    assert!(!result.is_failed());
    assert_eq!(result.error_count(), 1);
}

#[test]
fn test_result_files_readable_through_permitted_root() {
    let output = tempfile::tempdir().unwrap();
    let mut writer = OutputWriter::new(output.path()).unwrap();

    let mut result = gleaner_domain::DocumentResult::new("application.txt");
    result.records.push(gleaner_domain::ExtractionRecord::new(
        "First name",
        "John",
        0.9,
        "personal_data_extractor",
        "personal_data",
    ));
    writer.write_document_result(&result).unwrap();

    let root = PermittedRoot::new(output.path()).unwrap();
    let contents = root.read("application_txt_results.json").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["filename"], "application.txt");

    assert!(root.read("../somewhere-else.json").is_err());
}
