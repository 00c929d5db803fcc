//! # Run-Level Errors
//!
//! Infrastructure failures that abort a whole run. Per-file validation
//! outcomes are never reported through this type.

use std::path::PathBuf;

use thiserror::Error;

/// A fatal error for the batch as a whole.
#[derive(Error, Debug)]
pub enum RunError {
    /// The input directory could not be listed.
    #[error("cannot list event directory {path}: {source}")]
    ListEvents {
        /// The directory that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The worker thread pool could not be started.
    #[error("cannot start worker pool with {jobs} threads: {reason}")]
    WorkerPool {
        /// Requested thread count.
        jobs: usize,
        /// Human-readable reason.
        reason: String,
    },

    /// The run log could not be written.
    #[error("cannot write log {path}: {source}")]
    WriteLog {
        /// The log path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_events_display() {
        let err = RunError::ListEvents {
            path: PathBuf::from("event"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("event"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn write_log_exposes_source() {
        use std::error::Error as _;
        let err = RunError::WriteLog {
            path: PathBuf::from("log.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("log.txt"));
    }

    #[test]
    fn worker_pool_display() {
        let err = RunError::WorkerPool {
            jobs: 8,
            reason: "spawn failed".to_string(),
        };
        assert!(err.to_string().contains("8 threads"));
    }
}
