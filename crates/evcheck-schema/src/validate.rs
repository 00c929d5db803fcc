//! # Structural Validation
//!
//! A compiled [`Schema`] and the [`Violation`]s it reports for a payload.

use std::fmt;
use std::path::{Path, PathBuf};

use evcheck_core::EventType;
use jsonschema::Validator;
use serde_json::Value;

use crate::message::describe;

/// Phrase inserted between a violation message and its key path.
const PATH_HINT: &str = "обратите внимание на ключ";

/// A single mismatch between a payload and its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Human-readable description of the mismatch.
    pub message: String,
    /// Property names and array indices locating the offending value.
    /// Empty for root-level violations.
    pub path: Vec<String>,
}

impl Violation {
    /// Build a violation from a message and a path.
    pub fn new(message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }

    /// The log text for this violation.
    ///
    /// A non-empty path is appended after the message; a root-level
    /// violation is the bare message.
    pub fn render(&self) -> String {
        if self.path.is_empty() {
            self.message.clone()
        } else {
            format!("{}, {PATH_HINT} {}", self.message, self.path.join(" "))
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Split a JSON Pointer into its unescaped reference tokens.
///
/// `""` is the root and yields no tokens.
fn pointer_tokens(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .trim_start_matches('/')
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// A schema document compiled for one event type.
///
/// Immutable once built; shared between files (and threads) through `Arc`.
pub struct Schema {
    event_type: EventType,
    path: PathBuf,
    validator: Validator,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("event_type", &self.event_type)
            .field("path", &self.path)
            .finish()
    }
}

impl Schema {
    pub(crate) fn new(event_type: EventType, path: PathBuf, validator: Validator) -> Self {
        Self {
            event_type,
            path,
            validator,
        }
    }

    /// The event type this schema validates.
    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// Where the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily check `payload`, yielding violations in validator order.
    ///
    /// The iterator is finite; restarting it means calling this again.
    pub fn violations<'a>(&'a self, payload: &'a Value) -> impl Iterator<Item = Violation> + 'a {
        self.validator.iter_errors(payload).map(|err| {
            Violation::new(describe(&err), pointer_tokens(&err.instance_path.to_string()))
        })
    }

    /// Whether `payload` conforms.
    pub fn is_valid(&self, payload: &Value) -> bool {
        self.validator.is_valid(payload)
    }
}
