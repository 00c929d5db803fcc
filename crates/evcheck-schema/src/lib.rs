//! # evcheck-schema: Schema Resolution & Structural Validation
//!
//! Maps an event type to its schema document and checks payloads against
//! it.
//!
//! ## Resolution (`resolve`)
//!
//! [`SchemaResolver`] locates `<schema_dir>/<event>.<extension>`, parses it,
//! and compiles it into a Draft-7 validator. Every outcome, including
//! "not found", is cached per event type for the lifetime of the resolver,
//! so a schema is read from disk at most once per run.
//!
//! ## Validation (`validate`)
//!
//! [`Schema::violations`] wraps the `jsonschema` crate's lazy error
//! iterator and yields [`Violation`]s carrying a message and a path into
//! the payload. Messages quote the offending value (`'x' is not of type
//! 'number'`). [`Violation::render`] produces the log text.
//!
//! ## Crate Policy
//!
//! - Depends only on `evcheck-core` internally.
//! - `$ref`s resolve against the schema directory only; nothing is
//!   fetched over the network.

mod message;
pub mod resolve;
pub mod validate;

pub use resolve::{SchemaError, SchemaResolver, DEFAULT_SCHEMA_EXTENSION};
pub use validate::{Schema, Violation};
