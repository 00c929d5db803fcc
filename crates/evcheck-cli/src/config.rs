//! # Config File Loading
//!
//! Reads an optional YAML file into a [`BatchConfig`]. Missing keys take
//! their defaults; unknown keys are rejected so typos surface early.
//!
//! ```yaml
//! events_dir: event
//! schema_dir: schema
//! schema_extension: schema
//! log_path: log.txt
//! extension: json
//! jobs: 4
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use evcheck_pipeline::BatchConfig;

/// Load configuration from `path`, or defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<BatchConfig> {
    let Some(path) = path else {
        return Ok(BatchConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(BatchConfig::default());
    }

    let config: BatchConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    tracing::debug!(path = %path.display(), ?config, "loaded config file");
    Ok(config)
}
