//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{BatchSummary, Formatter};
use gleaner_aggregate::Aggregator;
use gleaner_domain::traits::DocumentSource;
use gleaner_extractors::{ExtractorConfig, PersonalDataExtractor, TabularDataExtractor};
use gleaner_llm::OllamaProvider;
use gleaner_output::OutputWriter;
use gleaner_pipeline::{BatchRunner, FsDocumentSource, Orchestrator};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Execute the run command: discover, extract, aggregate, write.
pub async fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let endpoint = args.endpoint.unwrap_or_else(|| config.llm.endpoint.clone());
    let model = args.model.unwrap_or_else(|| config.llm.model.clone());
    let workers = args.workers.unwrap_or(config.batch.workers);
    let output_dir = args.output.unwrap_or_else(|| config.batch.output_dir.clone());

    if workers == 0 {
        return Err(CliError::InvalidInput(
            "workers must be greater than 0".to_string(),
        ));
    }

    let extraction = if args.lenient {
        ExtractorConfig {
            max_text_length: ExtractorConfig::lenient().max_text_length,
            ..config.extraction.clone()
        }
    } else {
        config.extraction.clone()
    };

    // One provider shared by both extractors
    let provider = Arc::new(
        OllamaProvider::new(endpoint.clone(), model.clone())
            .with_max_retries(config.llm.max_retries)
            .with_timeout(Duration::from_secs(config.llm.timeout_secs)),
    );
    info!(%endpoint, %model, "Using model provider");

    let mut orchestrator = Orchestrator::new();
    orchestrator.register(Arc::new(PersonalDataExtractor::new(
        Arc::clone(&provider),
        extraction.clone(),
    )));
    orchestrator.register(Arc::new(TabularDataExtractor::new(provider, extraction)));

    let source = Arc::new(FsDocumentSource::new());
    let paths = source.discover(&args.input)?;
    if paths.is_empty() {
        return Err(CliError::NoDocuments(args.input));
    }
    println!(
        "{}",
        formatter.info(&format!("Processing {} document(s) from {}", paths.len(), args.input.display()))
    );

    let runner = BatchRunner::new(orchestrator, workers);
    let results = runner.run(source, paths).await?;

    let mut writer = OutputWriter::new(&output_dir)?;
    for result in &results {
        writer.write_document_result(result)?;
    }

    let report = Aggregator::new().aggregate(&results);
    writer.write_aggregation(&report)?;

    let summary = BatchSummary::from_batch(&results, &report, &output_dir.display().to_string());
    println!("{}", formatter.format_summary(&summary)?);

    Ok(())
}
