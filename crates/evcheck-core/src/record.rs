//! # Event Records
//!
//! Decoding raw file content into a JSON document ([`decode_record`]) and
//! extracting the declared event type from it ([`Record::classify`]).
//!
//! ## Truthiness
//!
//! A document or an `event` value counts as absent when it is falsy:
//! `null`, `false`, `0`, `""`, `[]`, or `{}`. See [`is_truthy`].

use std::fmt;

use serde_json::Value;

use crate::error::RecordError;

/// Key holding the event-type selector.
const EVENT_KEY: &str = "event";

/// Key holding the payload to validate.
const PAYLOAD_KEY: &str = "data";

/// Whether a JSON value is non-empty in the boolean sense.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Decode raw file bytes into a non-empty JSON document.
///
/// # Errors
///
/// Returns [`RecordError::Decode`] for non-UTF-8 or malformed JSON, and
/// [`RecordError::EmptyContent`] when the document is falsy.
pub fn decode_record(raw: &[u8]) -> Result<Value, RecordError> {
    let text = std::str::from_utf8(raw).map_err(|_| RecordError::Decode)?;
    let value: Value = serde_json::from_str(text).map_err(|_| RecordError::Decode)?;
    if !is_truthy(&value) {
        return Err(RecordError::EmptyContent);
    }
    Ok(value)
}

/// The declared type of an event record.
///
/// Used as the lookup key for schema documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventType(String);

impl EventType {
    /// Wrap an event-type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The event-type name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is usable as a single file-name component.
    ///
    /// Rejects empty names, `.`/`..`, and anything containing a path
    /// separator or NUL.
    pub fn is_plain_name(&self) -> bool {
        let name = self.0.as_str();
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0'])
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decoded event record whose event type has been extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    event_type: EventType,
    document: Value,
}

impl Record {
    /// Extract the event type from a decoded document.
    ///
    /// A string `event` is used verbatim and a number through its textual
    /// form.
    ///
    /// # Errors
    ///
    /// [`RecordError::MissingEvent`] when the document is not a mapping or
    /// `event` is absent or falsy. [`RecordError::UnresolvedSchema`] when
    /// `event` is truthy but cannot name a schema (`true`, arrays, objects).
    pub fn classify(document: Value) -> Result<Self, RecordError> {
        let event = document
            .get(EVENT_KEY)
            .filter(|v| is_truthy(v))
            .ok_or(RecordError::MissingEvent)?;

        let event_type = match event {
            Value::String(s) => EventType::new(s.as_str()),
            Value::Number(n) => EventType::new(n.to_string()),
            _ => return Err(RecordError::UnresolvedSchema),
        };

        Ok(Self {
            event_type,
            document,
        })
    }

    /// The declared event type.
    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// The payload under `data`.
    ///
    /// # Errors
    ///
    /// [`RecordError::MissingPayload`] when the key is absent. A present
    /// `null` is returned as-is and left to the schema to judge.
    pub fn payload(&self) -> Result<&Value, RecordError> {
        self.document
            .get(PAYLOAD_KEY)
            .ok_or(RecordError::MissingPayload)
    }
}
