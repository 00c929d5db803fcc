//! # Validate Subcommand
//!
//! Validates every event file in the input directory against the schema
//! named by its `event` field and writes the consolidated failure log.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use evcheck_pipeline::{run_batch, BatchConfig};

use crate::{EXIT_CLEAN, EXIT_FAILURES};

/// Arguments for the `evcheck validate` subcommand.
///
/// Every flag overrides the corresponding config file value.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Directory of event files [default: event].
    #[arg(long, value_name = "DIR")]
    pub events: Option<PathBuf>,

    /// Directory of schema documents [default: schema].
    #[arg(long, value_name = "DIR")]
    pub schemas: Option<PathBuf>,

    /// Extension of schema documents [default: schema].
    #[arg(long, value_name = "EXT")]
    pub schema_extension: Option<String>,

    /// Where to write the failure log [default: log.txt].
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Only process event files with this extension.
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Worker threads; 1 runs sequentially [default: 1].
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

impl ValidateArgs {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, mut config: BatchConfig) -> BatchConfig {
        if let Some(ref events) = self.events {
            config.events_dir = events.clone();
        }
        if let Some(ref schemas) = self.schemas {
            config.schema_dir = schemas.clone();
        }
        if let Some(ref ext) = self.schema_extension {
            config.schema_extension = ext.clone();
        }
        if let Some(ref log) = self.log {
            config.log_path = log.clone();
        }
        if let Some(ref ext) = self.extension {
            config.extension = Some(ext.clone());
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        config
    }
}

/// Execute the validate subcommand.
///
/// Returns the exit code: 0 when every file passed, 1 when any failed.
/// Fatal run errors are returned as `Err`.
pub fn run_validate(args: &ValidateArgs, config: BatchConfig) -> Result<u8> {
    let config = args.apply(config);
    let summary = run_batch(&config).with_context(|| {
        format!(
            "validation run over {} did not complete",
            config.events_dir.display()
        )
    })?;

    let report = &summary.report;
    println!("Events: {}/{} passed", report.passed(), report.total);

    for line in &summary.lines {
        println!("  FAIL: {line}");
    }

    if report.is_clean() {
        Ok(EXIT_CLEAN)
    } else {
        println!(
            "\n{} event file(s) failed validation out of {} total. See {}.",
            report.failed(),
            report.total,
            config.log_path.display()
        );
        Ok(EXIT_FAILURES)
    }
}
