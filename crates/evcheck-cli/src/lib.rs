//! # evcheck-cli: Command-Line Interface
//!
//! Provides the `evcheck` binary.
//!
//! ## Subcommands
//!
//! - `evcheck validate`: validate every event file in a directory and
//!   write the failure log.
//!
//! ```bash
//! evcheck validate
//! evcheck validate --events incoming/ --schemas schema/ --log report.txt -j 8
//! evcheck --config evcheck.yaml validate
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing and config merging live here; the pipeline itself
//!   lives in `evcheck-pipeline`.
//! - Exit codes: 0 clean batch, 1 at least one failing file, 2 fatal run
//!   error.

pub mod config;
pub mod validate;

/// Exit code for a batch with no failures.
pub const EXIT_CLEAN: u8 = 0;

/// Exit code for a batch with at least one failing file.
pub const EXIT_FAILURES: u8 = 1;

/// Exit code for a run that could not complete.
pub const EXIT_FATAL: u8 = 2;
