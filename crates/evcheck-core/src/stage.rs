//! # Per-File Pipeline Stages
//!
//! Every event file moves through the same linear sequence:
//!
//! ```text
//! Loading -> Classifying -> Resolving -> Validating -> Done
//! ```
//!
//! Any stage may fail, which moves the file into the absorbing `Failed`
//! state. No further stage runs for a failed file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The pipeline stage a file is in, or has terminated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Reading and decoding the raw file content.
    Loading,
    /// Extracting the declared event type.
    Classifying,
    /// Locating and compiling the schema for the event type.
    Resolving,
    /// Checking the payload against the schema.
    Validating,
    /// All stages passed with zero violations. Terminal state.
    Done,
    /// A stage failed. Terminal state.
    Failed,
}

impl Stage {
    /// Lowercase name used in structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Classifying => "classifying",
            Self::Resolving => "resolving",
            Self::Validating => "validating",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
