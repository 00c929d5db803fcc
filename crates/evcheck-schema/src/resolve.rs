//! # Schema Resolution
//!
//! Maps an event type to `<schema_dir>/<event>.<extension>`, parses the
//! document, and compiles it into a Draft-7 validator.
//!
//! ## Caching
//!
//! Outcomes are cached per event type behind a read-mostly
//! `parking_lot::RwLock`. Failures are cached too, so a missing or broken
//! schema is looked up once and reported for every file that names it.
//!
//! Each event type owns a `OnceLock` cell. The map lock is held only to
//! find or insert the cell; the document is loaded outside it, inside
//! `OnceLock::get_or_init`. Workers asking for the same type wait on that
//! cell, while workers asking for other types proceed.
//!
//! ## `$ref` resolution
//!
//! [`LocalSchemaRetriever`] serves cross-document `$ref`s from the schema
//! directory by the last path segment of the URI. Nothing is fetched over
//! the network; an unknown reference fails schema compilation.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use evcheck_core::{EventType, RecordError};
use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;

use crate::validate::Schema;

/// File extension of schema documents.
pub const DEFAULT_SCHEMA_EXTENSION: &str = "schema";

/// Errors resolving an event type to a compiled schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No document exists for the event type.
    #[error("no schema for event '{event}' at {path}")]
    NotFound {
        /// The requested event type.
        event: String,
        /// Where the document was expected.
        path: String,
    },

    /// The event type cannot name a file inside the schema directory.
    #[error("event '{event}' is not a valid schema name")]
    InvalidName {
        /// The requested event type.
        event: String,
    },

    /// The document exists but could not be read.
    #[error("failed to read schema {path}: {reason}")]
    Read {
        /// The requested event type.
        event: String,
        /// Path of the document.
        path: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The document is not valid JSON.
    #[error("failed to parse schema {path}: {reason}")]
    Parse {
        /// The requested event type.
        event: String,
        /// Path of the document.
        path: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The document is JSON but not a usable schema.
    #[error("failed to compile schema {path}: {reason}")]
    Compile {
        /// The requested event type.
        event: String,
        /// Path of the document.
        path: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl From<SchemaError> for RecordError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::NotFound { .. } | SchemaError::InvalidName { .. } => {
                RecordError::UnresolvedSchema
            }
            SchemaError::Read { event, .. }
            | SchemaError::Parse { event, .. }
            | SchemaError::Compile { event, .. } => RecordError::BrokenSchema { event },
        }
    }
}

/// Serves `$ref` targets from the schema directory.
struct LocalSchemaRetriever {
    schema_dir: PathBuf,
    extension: String,
}

impl LocalSchemaRetriever {
    fn lookup(&self, uri: &str) -> Result<Value, String> {
        let name = uri
            .split(['#', '?'])
            .next()
            .unwrap_or(uri)
            .rsplit('/')
            .next()
            .unwrap_or(uri);

        if !EventType::new(name).is_plain_name() {
            return Err(format!("cannot resolve $ref {uri} locally"));
        }

        let direct = self.schema_dir.join(name);
        let path = if direct.is_file() {
            direct
        } else {
            document_path(&self.schema_dir, name, &self.extension)
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot resolve $ref {uri} ({}): {e}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("invalid JSON in $ref target {}: {e}", path.display()))
    }
}

impl jsonschema::Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        self.lookup(uri.as_str()).map_err(Into::into)
    }
}

fn document_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    if extension.is_empty() {
        dir.join(name)
    } else {
        dir.join(format!("{name}.{extension}"))
    }
}

type CachedSchema = Result<Arc<Schema>, SchemaError>;
type SchemaCell = Arc<OnceLock<CachedSchema>>;

/// Resolves event types to compiled schemas, one document per type.
///
/// `Send + Sync`; share one resolver across worker threads for a run.
pub struct SchemaResolver {
    schema_dir: PathBuf,
    extension: String,
    cache: RwLock<HashMap<EventType, SchemaCell>>,
    disk_reads: AtomicUsize,
}

impl std::fmt::Debug for SchemaResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaResolver")
            .field("schema_dir", &self.schema_dir)
            .field("extension", &self.extension)
            .field("cached", &self.cached_count())
            .finish()
    }
}

impl SchemaResolver {
    /// A resolver over `schema_dir` using the `.schema` extension.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self::with_extension(schema_dir, DEFAULT_SCHEMA_EXTENSION)
    }

    /// A resolver over `schema_dir` with a custom extension.
    ///
    /// A leading dot is ignored; an empty extension means the document is
    /// named exactly after the event type.
    pub fn with_extension(schema_dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
            cache: RwLock::new(HashMap::new()),
            disk_reads: AtomicUsize::new(0),
        }
    }

    /// The schema root directory.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Where the document for `event` is expected.
    pub fn schema_path(&self, event: &EventType) -> PathBuf {
        document_path(&self.schema_dir, event.as_str(), &self.extension)
    }

    /// Number of event types resolved so far (successes and failures).
    pub fn cached_count(&self) -> usize {
        self.cache
            .read()
            .values()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    /// Number of schema documents read from disk so far.
    pub fn disk_reads(&self) -> usize {
        self.disk_reads.load(Ordering::Relaxed)
    }

    /// Resolve `event` to its compiled schema.
    ///
    /// # Errors
    ///
    /// [`SchemaError::NotFound`] / [`SchemaError::InvalidName`] when no
    /// document can exist for the type; [`SchemaError::Read`],
    /// [`SchemaError::Parse`], or [`SchemaError::Compile`] when it exists
    /// but is unusable.
    pub fn resolve(&self, event: &EventType) -> Result<Arc<Schema>, SchemaError> {
        self.cell(event)
            .get_or_init(|| {
                let outcome = self.load(event).map(Arc::new);
                match &outcome {
                    Ok(schema) => tracing::debug!(
                        event = %schema.event_type(),
                        path = %schema.path().display(),
                        "compiled schema"
                    ),
                    Err(e) => tracing::debug!(event = %event, error = %e, "schema unresolved"),
                }
                outcome
            })
            .clone()
    }

    /// The cache cell for `event`, inserted empty on first request.
    fn cell(&self, event: &EventType) -> SchemaCell {
        if let Some(cell) = self.cache.read().get(event) {
            return Arc::clone(cell);
        }
        Arc::clone(self.cache.write().entry(event.clone()).or_default())
    }

    fn load(&self, event: &EventType) -> Result<Schema, SchemaError> {
        if !event.is_plain_name() {
            return Err(SchemaError::InvalidName {
                event: event.to_string(),
            });
        }

        let path = self.schema_path(event);
        self.disk_reads.fetch_add(1, Ordering::Relaxed);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SchemaError::NotFound {
                    event: event.to_string(),
                    path: path.display().to_string(),
                }
            } else {
                SchemaError::Read {
                    event: event.to_string(),
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let document: Value =
            serde_json::from_str(&content).map_err(|e| SchemaError::Parse {
                event: event.to_string(),
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let retriever = LocalSchemaRetriever {
            schema_dir: self.schema_dir.clone(),
            extension: self.extension.clone(),
        };

        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .with_retriever(retriever)
            .build(&document)
            .map_err(|e| SchemaError::Compile {
                event: event.to_string(),
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Schema::new(event.clone(), path, validator))
    }
}
