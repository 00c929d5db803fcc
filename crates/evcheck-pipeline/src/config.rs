//! # Batch Configuration
//!
//! Locations and knobs for one run. Every field has a default, so an empty
//! config file (or none at all) reproduces the conventional layout:
//! `event/` in, `schema/<event>.schema` for schemas, `log.txt` out.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for a single batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Directory of event files.
    pub events_dir: PathBuf,
    /// Directory of schema documents.
    pub schema_dir: PathBuf,
    /// Extension of schema documents, without the dot.
    pub schema_extension: String,
    /// Where the run log is written.
    pub log_path: PathBuf,
    /// Only process event files with this extension. `None` processes all.
    pub extension: Option<String>,
    /// Worker threads for the per-file pipeline. `1` runs sequentially.
    pub jobs: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            events_dir: PathBuf::from("event"),
            schema_dir: PathBuf::from("schema"),
            schema_extension: evcheck_schema::DEFAULT_SCHEMA_EXTENSION.to_string(),
            log_path: PathBuf::from("log.txt"),
            extension: None,
            jobs: 1,
        }
    }
}
