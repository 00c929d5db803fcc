//! # Failure Aggregation
//!
//! Flattens failure entries into log lines. Structural violation lists are
//! joined with [`VIOLATION_DELIMITER`]; single messages pass through.

use evcheck_core::{FailureDetail, FailureEntry, LogLine, VIOLATION_DELIMITER};

/// Flatten one entry. An empty violation list produces no line.
pub fn flatten_entry(entry: FailureEntry) -> Option<LogLine> {
    let detail = match entry.detail {
        FailureDetail::One(message) => message,
        FailureDetail::Many(messages) if messages.is_empty() => return None,
        FailureDetail::Many(messages) => messages.join(VIOLATION_DELIMITER),
    };
    Some(LogLine {
        file_name: entry.file_name,
        detail,
    })
}

/// Flatten all entries, preserving order.
pub fn flatten(entries: Vec<FailureEntry>) -> Vec<LogLine> {
    entries.into_iter().filter_map(flatten_entry).collect()
}
