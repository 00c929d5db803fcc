//! # Run Log Writer
//!
//! One line per failing file, each newline-terminated, in run order.
//! The file is written once at the end of a run and replaces any previous
//! content. An empty file means a clean batch.

use std::fmt::Write as _;
use std::path::Path;

use evcheck_core::LogLine;

use crate::error::RunError;

/// Render log lines to the on-disk text.
pub fn render_log(lines: &[LogLine]) -> String {
    let mut out = String::new();
    for line in lines {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{line}");
    }
    out
}

/// Write `lines` to `path`, overwriting it.
///
/// # Errors
///
/// [`RunError::WriteLog`] if the file cannot be created or written.
pub fn write_log(path: &Path, lines: &[LogLine]) -> Result<(), RunError> {
    std::fs::write(path, render_log(lines)).map_err(|source| RunError::WriteLog {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "wrote run log");
    Ok(())
}
