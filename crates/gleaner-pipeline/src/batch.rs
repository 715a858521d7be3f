//! Bounded-concurrency batch runner
//!
//! One task per document behind a semaphore; loading and the synchronous
//! pipeline run on the blocking thread pool. All tasks are joined before
//! returning, so callers see a complete batch. A panicking task degrades
//! to a failed `DocumentResult` for that document only.

use crate::error::PipelineError;
use crate::orchestrator::Orchestrator;
use gleaner_domain::traits::DocumentSource;
use gleaner_domain::DocumentResult;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Default number of concurrent document tasks
pub const DEFAULT_WORKERS: usize = 4;

/// Runs a batch of documents through the orchestrator
pub struct BatchRunner {
    orchestrator: Arc<Orchestrator>,
    workers: usize,
}

impl BatchRunner {
    /// Create a batch runner with the given concurrency bound
    pub fn new(orchestrator: Orchestrator, workers: usize) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            workers: workers.max(1),
        }
    }

    /// Process every path and return one result per document
    ///
    /// Results come back sorted by filename: batch order has no effect on
    /// aggregation, and a deterministic order keeps reruns comparable.
    pub async fn run<S>(
        &self,
        source: Arc<S>,
        paths: Vec<PathBuf>,
    ) -> Result<Vec<DocumentResult>, PipelineError>
    where
        S: DocumentSource + Send + Sync + 'static,
        S::Error: std::fmt::Display,
    {
        info!(documents = paths.len(), workers = self.workers, "Starting batch");

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut handles = Vec::with_capacity(paths.len());

        for path in paths {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| PipelineError::WorkerPool(e.to_string()))?;
            let orchestrator = Arc::clone(&self.orchestrator);
            let source = Arc::clone(&source);

            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let task_filename = filename.clone();

            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                match source.load(&path) {
                    Ok(document) => orchestrator.run(&document),
                    Err(e) => {
                        warn!(file = %task_filename, error = %e, "Document failed to load");
                        DocumentResult::failed(task_filename, e.to_string())
                    }
                }
            });
            handles.push((filename, handle));
        }

        // Full-batch barrier: nothing downstream starts until every
        // document task has completed or failed
        let mut results = Vec::with_capacity(handles.len());
        for (filename, handle) in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(file = %filename, error = %e, "Document task panicked");
                    results.push(DocumentResult::failed(
                        filename,
                        format!("document task failed: {}", e),
                    ));
                }
            }
        }

        results.sort_by(|a, b| a.filename.cmp(&b.filename));

        let failed = results.iter().filter(|r| r.is_failed()).count();
        info!(
            documents = results.len(),
            failed,
            "Batch complete"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FsDocumentSource;
    use gleaner_domain::traits::{ExtractError, FieldExtractor};
    use gleaner_domain::{Document, ExtractionRecord};
    use std::fs;

    /// Emits one record naming the file it was run against
    struct EchoExtractor;

    impl FieldExtractor for EchoExtractor {
        fn identifier(&self) -> &str {
            "echo"
        }

        fn kind(&self) -> &str {
            "test_kind"
        }

        fn priority(&self) -> i32 {
            10
        }

        fn can_process(&self, _document: &Document) -> bool {
            true
        }

        fn extract(
            &self,
            text: &str,
            _filename: &str,
        ) -> Result<Vec<ExtractionRecord>, ExtractError> {
            Ok(vec![ExtractionRecord::new(
                "First name",
                text.trim(),
                0.9,
                "echo",
                "test_kind",
            )])
        }
    }

    /// Panics for one document, succeeds for the rest
    struct PanickyExtractor;

    impl FieldExtractor for PanickyExtractor {
        fn identifier(&self) -> &str {
            "panicky"
        }

        fn kind(&self) -> &str {
            "test_kind"
        }

        fn priority(&self) -> i32 {
            10
        }

        fn can_process(&self, _document: &Document) -> bool {
            true
        }

        fn extract(
            &self,
            text: &str,
            _filename: &str,
        ) -> Result<Vec<ExtractionRecord>, ExtractError> {
            if text.contains("poison") {
                panic!("poisoned document");
            }
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_batch_runs_all_documents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "Alice").unwrap();
        fs::write(dir.path().join("b.txt"), "Bob").unwrap();
        fs::write(dir.path().join("c.txt"), "Carol").unwrap();

        let mut orchestrator = Orchestrator::new();
        orchestrator.register(Arc::new(EchoExtractor));

        let source = Arc::new(FsDocumentSource::new());
        let paths = source.discover(dir.path()).unwrap();

        let runner = BatchRunner::new(orchestrator, 2);
        let results = runner.run(source, paths).await.unwrap();

        assert_eq!(results.len(), 3);
        let filenames: Vec<&str> = results.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(filenames, vec!["a.txt", "b.txt", "c.txt"]);
        assert!(results.iter().all(|r| !r.is_failed()));
        assert_eq!(results[0].records[0].value, "Alice");
    }

    #[tokio::test]
    async fn test_unreadable_document_occupies_slot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.txt"), "text").unwrap();
        fs::write(dir.path().join("scan.pdf"), b"%PDF-1.4").unwrap();

        let mut orchestrator = Orchestrator::new();
        orchestrator.register(Arc::new(EchoExtractor));

        let source = Arc::new(FsDocumentSource::new());
        let paths = source.discover(dir.path()).unwrap();

        let runner = BatchRunner::new(orchestrator, 4);
        let results = runner.run(source, paths).await.unwrap();

        assert_eq!(results.len(), 2);
        let failed = results.iter().find(|r| r.filename == "scan.pdf").unwrap();
        assert!(failed.is_failed());
        assert!(failed.records.is_empty());
        assert!(failed.failure.as_deref().unwrap().contains("unsupported"));

        let good = results.iter().find(|r| r.filename == "good.txt").unwrap();
        assert!(!good.is_failed());
    }

    #[tokio::test]
    async fn test_panicking_task_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fine.txt"), "ok").unwrap();
        fs::write(dir.path().join("bad.txt"), "poison").unwrap();

        let mut orchestrator = Orchestrator::new();
        orchestrator.register(Arc::new(PanickyExtractor));

        let source = Arc::new(FsDocumentSource::new());
        let paths = source.discover(dir.path()).unwrap();

        let runner = BatchRunner::new(orchestrator, 2);
        let results = runner.run(source, paths).await.unwrap();

        assert_eq!(results.len(), 2);
        let bad = results.iter().find(|r| r.filename == "bad.txt").unwrap();
        assert!(bad.is_failed());
        let fine = results.iter().find(|r| r.filename == "fine.txt").unwrap();
        assert!(!fine.is_failed());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let runner = BatchRunner::new(Orchestrator::new(), 2);
        let source = Arc::new(FsDocumentSource::new());
        let results = runner.run(source, Vec::new()).await.unwrap();
        assert!(results.is_empty());
    }
}
