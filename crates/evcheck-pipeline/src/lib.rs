//! # evcheck-pipeline: Batch Validation Pipeline
//!
//! Drives a directory of event files through the validation stages and
//! writes the consolidated run log.
//!
//! ```text
//! discover -> [load -> classify -> resolve -> validate] per file
//!          -> aggregate -> write log
//! ```
//!
//! - [`discover`] lists the input directory in file-name order.
//! - [`orchestrator`] runs the per-file chain, stopping each file at its
//!   first failing stage, sequentially or on a bounded rayon pool.
//! - [`aggregate`] flattens failure entries into log lines.
//! - [`log`] persists the log, overwriting any previous run.
//!
//! Per-file problems never abort a run. Only [`RunError`]s (unlistable
//! input directory, worker pool failure, unwritable log) do.

pub mod aggregate;
pub mod config;
pub mod discover;
pub mod error;
pub mod log;
pub mod orchestrator;

pub use aggregate::{flatten, flatten_entry};
pub use config::BatchConfig;
pub use discover::{discover_files, EventFile};
pub use error::RunError;
pub use log::{render_log, write_log};
pub use orchestrator::{BatchOrchestrator, BatchReport};

use tracing::info;

/// Outcome of a full run: the report and the lines written to the log.
#[derive(Debug)]
pub struct RunSummary {
    /// Per-file results.
    pub report: BatchReport,
    /// Lines written to the log, in order.
    pub lines: Vec<evcheck_core::LogLine>,
}

/// Discover, validate, aggregate, and write the log for one batch.
///
/// # Errors
///
/// Returns a [`RunError`] if the input directory cannot be listed, the
/// worker pool cannot be built, or the log cannot be written. Per-file
/// failures are recorded in the log, not returned.
pub fn run_batch(config: &BatchConfig) -> Result<RunSummary, RunError> {
    let files = discover_files(&config.events_dir, config.extension.as_deref())?;
    info!(
        events_dir = %config.events_dir.display(),
        schema_dir = %config.schema_dir.display(),
        files = files.len(),
        jobs = config.jobs,
        "starting batch"
    );

    let orchestrator = BatchOrchestrator::from_config(config);
    let report = orchestrator.run(&files)?;
    let lines = flatten(report.entries.clone());
    write_log(&config.log_path, &lines)?;

    info!(
        total = report.total,
        passed = report.passed(),
        failed = report.failed(),
        schemas = orchestrator.resolver().cached_count(),
        schema_reads = orchestrator.resolver().disk_reads(),
        log = %config.log_path.display(),
        "batch complete"
    );

    Ok(RunSummary { report, lines })
}
