//! # Batch Orchestrator
//!
//! Pushes every event file through the per-file chain
//!
//! ```text
//! Loading -> Classifying -> Resolving -> Validating -> Done
//! ```
//!
//! Each stage returns `Result`; the first `Err` ends the file's run and
//! becomes its single [`FailureEntry`]. Structural violations are the one
//! non-error failure: a non-empty violation list is recorded as a `Many`
//! entry, an empty one records nothing.
//!
//! Files are independent. With `jobs > 1` they are processed on a
//! dedicated rayon pool; the indexed collect keeps entries in file order,
//! so parallel and sequential runs produce identical reports.

use std::sync::Arc;

use evcheck_core::{decode_record, FailureEntry, Record, RecordError, Stage};
use evcheck_schema::{Schema, SchemaResolver};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::BatchConfig;
use crate::discover::EventFile;
use crate::error::RunError;

/// Per-file results for a run, in file-iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Number of files processed.
    pub total: usize,
    /// One entry per failing file.
    pub entries: Vec<FailureEntry>,
}

impl BatchReport {
    /// Files that passed every stage.
    pub fn passed(&self) -> usize {
        self.total - self.entries.len()
    }

    /// Files that failed at some stage.
    pub fn failed(&self) -> usize {
        self.entries.len()
    }

    /// Whether every file passed.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs the validation pipeline over a set of event files.
#[derive(Debug)]
pub struct BatchOrchestrator {
    resolver: SchemaResolver,
    jobs: usize,
}

impl BatchOrchestrator {
    /// A sequential orchestrator over `resolver`.
    pub fn new(resolver: SchemaResolver) -> Self {
        Self { resolver, jobs: 1 }
    }

    /// Build from run configuration.
    pub fn from_config(config: &BatchConfig) -> Self {
        let resolver =
            SchemaResolver::with_extension(&config.schema_dir, &config.schema_extension);
        Self::new(resolver).with_jobs(config.jobs)
    }

    /// Use up to `jobs` worker threads. `0` and `1` both mean sequential.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// The schema resolver (and its cache) used by this orchestrator.
    pub fn resolver(&self) -> &SchemaResolver {
        &self.resolver
    }

    /// Process every file exactly once.
    ///
    /// # Errors
    ///
    /// [`RunError::WorkerPool`] if a parallel pool cannot be started.
    /// Per-file failures are recorded in the report.
    pub fn run(&self, files: &[EventFile]) -> Result<BatchReport, RunError> {
        let outcomes: Vec<Option<FailureEntry>> = if self.jobs > 1 && files.len() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .thread_name(|i| format!("evcheck-worker-{i}"))
                .build()
                .map_err(|e| RunError::WorkerPool {
                    jobs: self.jobs,
                    reason: e.to_string(),
                })?;
            pool.install(|| files.par_iter().map(|f| self.process_file(f)).collect())
        } else {
            files.iter().map(|f| self.process_file(f)).collect()
        };

        Ok(BatchReport {
            total: files.len(),
            entries: outcomes.into_iter().flatten().collect(),
        })
    }

    /// Run one file through all stages.
    ///
    /// Returns `None` for a clean file.
    pub fn process_file(&self, file: &EventFile) -> Option<FailureEntry> {
        match self.check_file(file) {
            Ok(violations) if violations.is_empty() => {
                debug!(file = %file.name, stage = %Stage::Done, "file passed");
                None
            }
            Ok(violations) => {
                debug!(
                    file = %file.name,
                    stage = %Stage::Validating,
                    violations = violations.len(),
                    "structural violations"
                );
                Some(FailureEntry::many(&file.name, violations))
            }
            Err(e) => {
                debug!(
                    file = %file.name,
                    stage = %Stage::Failed,
                    failed_at = %e.stage(),
                    error = %e,
                    "file failed"
                );
                Some(FailureEntry::one(&file.name, e.to_string()))
            }
        }
    }

    /// The stage chain. `Ok` carries the rendered violations.
    fn check_file(&self, file: &EventFile) -> Result<Vec<String>, RecordError> {
        let raw = std::fs::read(&file.path).map_err(|e| RecordError::Unreadable(e.to_string()))?;
        let document = decode_record(&raw)?;
        let record = Record::classify(document)?;
        let schema: Arc<Schema> = self.resolver.resolve(record.event_type())?;
        let payload = record.payload()?;
        Ok(schema.violations(payload).map(|v| v.render()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use evcheck_core::FailureDetail;
    use serde_json::json;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::create_dir(dir.path().join("event")).unwrap();
            std::fs::create_dir(dir.path().join("schema")).unwrap();
            std::fs::write(
                dir.path().join("schema").join("signup.schema"),
                json!({
                    "type": "object",
                    "required": ["age"],
                    "properties": {
                        "age": {"type": "number"},
                        "name": {"type": "string"}
                    }
                })
                .to_string(),
            )
            .unwrap();
            Self { dir }
        }

        fn event(&self, name: &str, content: &str) -> EventFile {
            let path = self.dir.path().join("event").join(name);
            std::fs::write(&path, content).unwrap();
            EventFile::from_path(path)
        }

        fn schema_dir(&self) -> std::path::PathBuf {
            self.dir.path().join("schema")
        }

        fn orchestrator(&self) -> BatchOrchestrator {
            BatchOrchestrator::new(SchemaResolver::new(self.schema_dir()))
        }
    }

    fn one(entry: &FailureEntry) -> &str {
        match &entry.detail {
            FailureDetail::One(m) => m,
            FailureDetail::Many(_) => panic!("expected One, got {entry:?}"),
        }
    }

    #[test]
    fn clean_file_records_nothing() {
        let fx = Fixture::new();
        let file = fx.event("e.json", r#"{"event": "signup", "data": {"age": 30}}"#);
        assert_eq!(fx.orchestrator().process_file(&file), None);
    }

    #[test]
    fn decode_failure_stops_pipeline() {
        let fx = Fixture::new();
        let file = fx.event("x.json", "not json");
        let orchestrator = fx.orchestrator();
        let entry = orchestrator.process_file(&file).unwrap();
        assert_eq!(one(&entry), RecordError::Decode.to_string());
        assert_eq!(orchestrator.resolver().cached_count(), 0);
    }

    #[test]
    fn empty_document() {
        let fx = Fixture::new();
        let entry = fx.orchestrator().process_file(&fx.event("a.json", "{}")).unwrap();
        assert_eq!(entry.file_name, "a.json");
        assert_eq!(one(&entry), "Представленный файл пуст, исправьте его");
    }

    #[test]
    fn missing_event_never_resolves_schema() {
        let fx = Fixture::new();
        let orchestrator = fx.orchestrator();
        let entry = orchestrator
            .process_file(&fx.event("b.json", r#"{"data": {}}"#))
            .unwrap();
        assert_eq!(one(&entry), "Поле event отсутствует, проверьте содержимое файла");
        assert_eq!(orchestrator.resolver().cached_count(), 0);
    }

    #[test]
    fn unknown_event() {
        let fx = Fixture::new();
        let entry = fx
            .orchestrator()
            .process_file(&fx.event("c.json", r#"{"event": "login", "data": {}}"#))
            .unwrap();
        assert_eq!(one(&entry), "Некорректро задано поле event, проверьте его содержимое");
    }

    #[test]
    fn unknown_event_reported_before_missing_payload() {
        let fx = Fixture::new();
        let entry = fx
            .orchestrator()
            .process_file(&fx.event("c.json", r#"{"event": "login"}"#))
            .unwrap();
        assert_eq!(one(&entry), RecordError::UnresolvedSchema.to_string());
    }

    #[test]
    fn missing_payload() {
        let fx = Fixture::new();
        let entry = fx
            .orchestrator()
            .process_file(&fx.event("p.json", r#"{"event": "signup"}"#))
            .unwrap();
        assert_eq!(one(&entry), RecordError::MissingPayload.to_string());
    }

    #[test]
    fn violations_collected_in_one_entry() {
        let fx = Fixture::new();
        let entry = fx
            .orchestrator()
            .process_file(&fx.event("d.json", r#"{"event": "signup", "data": {"name": 5}}"#))
            .unwrap();
        match entry.detail {
            FailureDetail::Many(messages) => {
                assert_eq!(messages.len(), 2);
                assert!(messages.iter().any(|m| m.ends_with("обратите внимание на ключ name")));
                assert!(messages.iter().any(|m| m.contains("age")));
            }
            FailureDetail::One(m) => panic!("expected violations, got {m}"),
        }
    }

    #[test]
    fn unreadable_file_is_per_file_failure() {
        let fx = Fixture::new();
        let ghost = EventFile::from_path(fx.dir.path().join("event").join("ghost.json"));
        let entry = fx.orchestrator().process_file(&ghost).unwrap();
        assert!(one(&entry).starts_with("Не удалось прочитать файл"));
    }

    #[test]
    fn run_preserves_order_and_counts() {
        let fx = Fixture::new();
        let files = vec![
            fx.event("a.json", "{}"),
            fx.event("b.json", r#"{"event": "signup", "data": {"age": 1}}"#),
            fx.event("c.json", r#"{"data": {}}"#),
        ];
        let report = fx.orchestrator().run(&files).unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_clean());
        let names: Vec<&str> = report.entries.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.json", "c.json"]);
    }

    #[test]
    fn shared_event_type_reads_schema_once() {
        let fx = Fixture::new();
        let files: Vec<EventFile> = (0..5)
            .map(|i| fx.event(&format!("{i}.json"), r#"{"event": "signup", "data": {"age": 1}}"#))
            .collect();
        let orchestrator = fx.orchestrator();
        let report = orchestrator.run(&files).unwrap();
        assert!(report.is_clean());
        assert_eq!(orchestrator.resolver().disk_reads(), 1);
    }

    #[test]
    fn parallel_matches_sequential() {
        let fx = Fixture::new();
        let mut files = Vec::new();
        for i in 0..40 {
            let content = match i % 5 {
                0 => "{}".to_string(),
                1 => r#"{"data": {}}"#.to_string(),
                2 => r#"{"event": "nope", "data": {}}"#.to_string(),
                3 => r#"{"event": "signup", "data": {"age": "x"}}"#.to_string(),
                _ => r#"{"event": "signup", "data": {"age": 3}}"#.to_string(),
            };
            files.push(fx.event(&format!("{i:02}.json"), &content));
        }

        let sequential = fx.orchestrator().run(&files).unwrap();
        let parallel = fx.orchestrator().with_jobs(4).run(&files).unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.failed(), 32);
    }

    #[test]
    fn zero_jobs_is_sequential() {
        let fx = Fixture::new();
        let orchestrator = fx.orchestrator().with_jobs(0);
        let report = orchestrator.run(&[]).unwrap();
        assert_eq!(report.total, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn from_config_uses_schema_settings() {
        let fx = Fixture::new();
        let config = BatchConfig {
            schema_dir: fx.schema_dir(),
            jobs: 3,
            ..BatchConfig::default()
        };
        let orchestrator = BatchOrchestrator::from_config(&config);
        assert_eq!(orchestrator.resolver().schema_dir(), Path::new(&fx.schema_dir()));
    }
}
