#![deny(missing_docs)]

//! # evcheck-core: Foundational Types for evcheck
//!
//! Defines the values that flow through the batch validation pipeline.
//! Depends only on `serde`, `serde_json`, and `thiserror`.
//!
//! ## Design Principles
//!
//! 1. **One outcome per file.** A file that fails produces exactly one
//!    [`FailureEntry`]; a clean file produces none.
//!
//! 2. **Tagged detail shape.** [`FailureDetail`] is either a single
//!    stage-level message or an ordered list of structural violations.
//!    Flattening it is an exhaustive `match`, never a runtime type check.
//!
//! 3. **[`RecordError`] is the operator-facing taxonomy.** Its `Display`
//!    output is exactly the text written to the run log.

pub mod error;
pub mod failure;
pub mod record;
pub mod stage;

pub use error::RecordError;
pub use failure::{FailureDetail, FailureEntry, LogLine, VIOLATION_DELIMITER};
pub use record::{decode_record, is_truthy, EventType, Record};
pub use stage::Stage;
