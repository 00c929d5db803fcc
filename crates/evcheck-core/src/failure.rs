//! # Failure Entries and Log Lines
//!
//! A [`FailureEntry`] is the single recorded outcome for a file that failed
//! at some pipeline stage. A [`LogLine`] is its flattened, printable form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Delimiter used when joining structural violations into one log line.
pub const VIOLATION_DELIMITER: &str = "; ";

/// What went wrong for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureDetail {
    /// A stage-level failure: bad decode, missing field, unresolved schema.
    One(String),
    /// Structural violations, in the order the validator yielded them.
    Many(Vec<String>),
}

/// The recorded failure for one event file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Bare file name (no directory component).
    pub file_name: String,
    /// The failure detail.
    pub detail: FailureDetail,
}

impl FailureEntry {
    /// A stage-level failure with a single message.
    pub fn one(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            detail: FailureDetail::One(message.into()),
        }
    }

    /// A structural-validation failure with an ordered message list.
    pub fn many(file_name: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            file_name: file_name.into(),
            detail: FailureDetail::Many(messages),
        }
    }
}

/// One line of the run log: `"<file_name>: <detail>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    /// Bare file name.
    pub file_name: String,
    /// Flattened detail text.
    pub detail: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file_name, self.detail)
    }
}
