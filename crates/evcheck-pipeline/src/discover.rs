//! # Event File Discovery
//!
//! Lists the regular files of the input directory, sorted by file name so
//! that the run log is deterministic. Subdirectories are skipped.

use std::path::{Path, PathBuf};

use crate::error::RunError;

/// One input file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventFile {
    /// Bare file name, as it appears in the log.
    pub name: String,
    /// Full path for reading.
    pub path: PathBuf,
}

impl EventFile {
    /// Build from a path; the name is its last component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// List event files under `dir`.
///
/// When `extension` is set (with or without a leading dot), only files
/// with that extension are returned.
///
/// # Errors
///
/// [`RunError::ListEvents`] if `dir` cannot be read. Unreadable individual
/// entries are skipped with a warning.
pub fn discover_files(dir: &Path, extension: Option<&str>) -> Result<Vec<EventFile>, RunError> {
    let entries = std::fs::read_dir(dir).map_err(|source| RunError::ListEvents {
        path: dir.to_path_buf(),
        source,
    })?;

    let wanted = extension.map(|e| e.trim_start_matches('.'));
    let mut files = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(wanted) = wanted {
            if path.extension().and_then(|e| e.to_str()) != Some(wanted) {
                continue;
            }
        }
        files.push(EventFile::from_path(path));
    }

    files.sort();
    tracing::debug!(dir = %dir.display(), count = files.len(), "discovered event files");
    Ok(files)
}
