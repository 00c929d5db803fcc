//! # Per-File Error Taxonomy
//!
//! Structured errors for a single event file, built with `thiserror`.
//! None of these abort a run: each is captured as a one-message
//! [`FailureEntry`](crate::FailureEntry) and the batch continues.
//!
//! The `Display` text of every variant is the operator-facing message
//! written verbatim into the run log.

use thiserror::Error;

use crate::stage::Stage;

/// A stage-level failure for one event file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The file could not be read from disk.
    #[error("Не удалось прочитать файл: {0}")]
    Unreadable(String),

    /// The content is not well-formed JSON.
    #[error("Представленный файл не формата JSON, исправьте его")]
    Decode,

    /// The content decodes to an empty or falsy document.
    #[error("Представленный файл пуст, исправьте его")]
    EmptyContent,

    /// The `event` selector is absent or falsy.
    #[error("Поле event отсутствует, проверьте содержимое файла")]
    MissingEvent,

    /// No schema document matches the declared event type.
    ///
    /// Covers both an unknown event type and a missing schema file.
    #[error("Некорректро задано поле event, проверьте его содержимое")]
    UnresolvedSchema,

    /// The schema document exists but cannot be read, parsed, or compiled.
    #[error("Схема для события {event} повреждена, проверьте файл схемы")]
    BrokenSchema {
        /// The event type whose schema is broken.
        event: String,
    },

    /// The `data` payload is absent.
    #[error("Поле data отсутствует, проверьте содержимое файла")]
    MissingPayload,
}

impl RecordError {
    /// The pipeline stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Unreadable(_) | Self::Decode | Self::EmptyContent => Stage::Loading,
            Self::MissingEvent => Stage::Classifying,
            Self::UnresolvedSchema | Self::BrokenSchema { .. } => Stage::Resolving,
            Self::MissingPayload => Stage::Validating,
        }
    }
}
