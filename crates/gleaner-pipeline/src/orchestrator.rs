//! Pipeline orchestrator
//!
//! Holds a priority-ordered registry of extractors and runs them over one
//! document, consolidating records and per-extractor run metadata into a
//! [`DocumentResult`]. Extractor failures, panics included, are caught
//! and recorded; they never abort the remaining extractors or the
//! document.

use crate::normalizer::Normalizer;
use gleaner_domain::record::{ExtractorRun, RunOutcome};
use gleaner_domain::traits::FieldExtractor;
use gleaner_domain::{Document, DocumentResult};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

struct Registration {
    extractor: Arc<dyn FieldExtractor>,
    priority: i32,
}

/// Priority-ordered extractor registry and per-document runner
#[derive(Default)]
pub struct Orchestrator {
    registry: Vec<Registration>,
}

impl Orchestrator {
    /// Create an orchestrator with no extractors registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extractor at its own default priority
    pub fn register(&mut self, extractor: Arc<dyn FieldExtractor>) {
        let priority = extractor.priority();
        self.register_with_priority(extractor, priority);
    }

    /// Register an extractor at an explicit priority
    ///
    /// Higher priority runs earlier; equal priorities keep registration
    /// order (the sort is stable).
    pub fn register_with_priority(&mut self, extractor: Arc<dyn FieldExtractor>, priority: i32) {
        info!(
            extractor = extractor.identifier(),
            kind = extractor.kind(),
            priority,
            "Registered extractor"
        );
        self.registry.push(Registration { extractor, priority });
        self.registry.sort_by_key(|r| std::cmp::Reverse(r.priority));
    }

    /// Number of registered extractors
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// True when no extractors are registered
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Identifier, kind, and priority of each extractor in execution order
    pub fn list(&self) -> Vec<(String, String, i32)> {
        self.registry
            .iter()
            .map(|r| {
                (
                    r.extractor.identifier().to_string(),
                    r.extractor.kind().to_string(),
                    r.priority,
                )
            })
            .collect()
    }

    /// Run every applicable extractor over one document
    ///
    /// Records from successful runs pass through the [`Normalizer`] and are
    /// appended in execution order. Synchronous; the batch runner calls it
    /// from the blocking thread pool.
    pub fn run(&self, document: &Document) -> DocumentResult {
        info!(file = %document.filename, extractors = self.registry.len(), "Starting pipeline run");
        let mut result = DocumentResult::new(&document.filename);

        for registration in &self.registry {
            let extractor = &registration.extractor;

            if !extractor.can_process(document) {
                debug!(
                    file = %document.filename,
                    extractor = extractor.identifier(),
                    "Extractor not applicable, skipping"
                );
                result.runs.push(ExtractorRun {
                    extractor: extractor.identifier().to_string(),
                    kind: extractor.kind().to_string(),
                    outcome: RunOutcome::Skipped,
                    duration_ms: 0,
                });
                continue;
            }

            let start = Instant::now();
            let extraction = catch_unwind(AssertUnwindSafe(|| {
                extractor.extract(&document.text, &document.filename)
            }));
            let outcome = match extraction {
                Ok(Ok(records)) => {
                    let produced = records.len();
                    result.records.extend(Normalizer::apply(records));
                    debug!(
                        file = %document.filename,
                        extractor = extractor.identifier(),
                        records = produced,
                        "Extractor completed"
                    );
                    RunOutcome::Completed { records: produced }
                }
                Ok(Err(e)) => {
                    warn!(
                        file = %document.filename,
                        extractor = extractor.identifier(),
                        error = %e,
                        "Extractor failed"
                    );
                    RunOutcome::Failed { error: e.to_string() }
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(
                        file = %document.filename,
                        extractor = extractor.identifier(),
                        error = message,
                        "Extractor panicked"
                    );
                    RunOutcome::Failed { error: format!("panicked: {message}") }
                }
            };

            result.runs.push(ExtractorRun {
                extractor: extractor.identifier().to_string(),
                kind: extractor.kind().to_string(),
                outcome,
                duration_ms: start.elapsed().as_millis() as u64,
            });
        }

        info!(
            file = %document.filename,
            records = result.records.len(),
            successes = result.success_count(),
            errors = result.error_count(),
            "Pipeline run complete"
        );

        result
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_domain::traits::ExtractError;
    use gleaner_domain::ExtractionRecord;

    /// Scripted extractor for orchestration tests
    struct FakeExtractor {
        id: &'static str,
        priority: i32,
        applicable: bool,
        fail: bool,
        values: Vec<(&'static str, &'static str)>,
    }

    impl FakeExtractor {
        fn emitting(id: &'static str, priority: i32, values: Vec<(&'static str, &'static str)>) -> Self {
            Self { id, priority, applicable: true, fail: false, values }
        }

        fn failing(id: &'static str, priority: i32) -> Self {
            Self { id, priority, applicable: true, fail: true, values: vec![] }
        }

        fn inapplicable(id: &'static str, priority: i32) -> Self {
            Self { id, priority, applicable: false, fail: false, values: vec![] }
        }
    }

    impl FieldExtractor for FakeExtractor {
        fn identifier(&self) -> &str {
            self.id
        }

        fn kind(&self) -> &str {
            "test_kind"
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn can_process(&self, _document: &Document) -> bool {
            self.applicable
        }

        fn extract(
            &self,
            _text: &str,
            _filename: &str,
        ) -> Result<Vec<ExtractionRecord>, ExtractError> {
            if self.fail {
                return Err(ExtractError::Llm("scripted failure".to_string()));
            }
            Ok(self
                .values
                .iter()
                .map(|(field, value)| ExtractionRecord::new(field, *value, 0.9, self.id, "test_kind"))
                .collect())
        }
    }

    fn doc() -> Document {
        Document::new("doc.txt", "some text")
    }

    #[test]
    fn test_descending_priority_order() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.register(Arc::new(FakeExtractor::emitting("low", 10, vec![("Field A", "a")])));
        orchestrator.register(Arc::new(FakeExtractor::emitting("high", 100, vec![("Field B", "b")])));

        let result = orchestrator.run(&doc());
        let order: Vec<&str> = result.runs.iter().map(|r| r.extractor.as_str()).collect();
        assert_eq!(order, vec!["high", "low"]);
        // Records follow execution order too
        assert_eq!(result.records[0].value, "b");
        assert_eq!(result.records[1].value, "a");
    }

    #[test]
    fn test_equal_priority_keeps_registration_order() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.register(Arc::new(FakeExtractor::emitting("first", 50, vec![])));
        orchestrator.register(Arc::new(FakeExtractor::emitting("second", 50, vec![])));
        orchestrator.register(Arc::new(FakeExtractor::emitting("third", 50, vec![])));

        let result = orchestrator.run(&doc());
        let order: Vec<&str> = result.runs.iter().map(|r| r.extractor.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_explicit_priority_overrides_default() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.register(Arc::new(FakeExtractor::emitting("a", 100, vec![])));
        orchestrator
            .register_with_priority(Arc::new(FakeExtractor::emitting("b", 10, vec![])), 200);

        let result = orchestrator.run(&doc());
        assert_eq!(result.runs[0].extractor, "b");
    }

    #[test]
    fn test_failure_is_isolated() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.register(Arc::new(FakeExtractor::failing("broken", 100)));
        orchestrator.register(Arc::new(FakeExtractor::emitting(
            "working",
            50,
            vec![("First name", "John")],
        )));

        let result = orchestrator.run(&doc());
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.success_count(), 1);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].value, "John");
        assert!(!result.is_failed());

        let failed = &result.runs[0];
        assert!(matches!(&failed.outcome, RunOutcome::Failed { error } if error.contains("scripted")));
    }

    /// Extractor that panics instead of returning `Err`
    struct PanickingExtractor;

    impl FieldExtractor for PanickingExtractor {
        fn identifier(&self) -> &str {
            "panicker"
        }

        fn kind(&self) -> &str {
            "test_kind"
        }

        fn priority(&self) -> i32 {
            100
        }

        fn can_process(&self, _document: &Document) -> bool {
            true
        }

        fn extract(
            &self,
            _text: &str,
            _filename: &str,
        ) -> Result<Vec<ExtractionRecord>, ExtractError> {
            panic!("index out of bounds")
        }
    }

    #[test]
    fn test_panicking_extractor_is_isolated() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.register(Arc::new(PanickingExtractor));
        orchestrator.register(Arc::new(FakeExtractor::emitting(
            "working",
            50,
            vec![("First name", "John")],
        )));

        let result = orchestrator.run(&doc());
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.success_count(), 1);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].value, "John");
        assert!(!result.is_failed());
        assert!(matches!(
            &result.runs[0].outcome,
            RunOutcome::Failed { error } if error.contains("index out of bounds")
        ));
    }

    #[test]
    fn test_inapplicable_extractor_is_skipped() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.register(Arc::new(FakeExtractor::inapplicable("skipper", 100)));

        let result = orchestrator.run(&doc());
        assert_eq!(result.runs.len(), 1);
        assert!(matches!(result.runs[0].outcome, RunOutcome::Skipped));
        assert_eq!(result.success_count(), 0);
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_sentinels_filtered_from_result() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.register(Arc::new(FakeExtractor::emitting(
            "mixed",
            100,
            vec![("First name", "John"), ("Last name", "Not found")],
        )));

        let result = orchestrator.run(&doc());
        assert_eq!(result.records.len(), 1);
        // Record count in metadata is pre-normalization
        assert!(matches!(result.runs[0].outcome, RunOutcome::Completed { records: 2 }));
    }

    #[test]
    fn test_empty_registry() {
        let orchestrator = Orchestrator::new();
        assert!(orchestrator.is_empty());
        let result = orchestrator.run(&doc());
        assert!(result.records.is_empty());
        assert!(result.runs.is_empty());
    }
}
