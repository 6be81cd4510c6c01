//! Error types for the editor

use folio_path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Failed to load {resource}: {reason}")]
    Load { resource: String, reason: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Schema could not be compiled: {0}")]
    SchemaCompile(String),

    #[error("Locale code {0:?} already exists, choose another one")]
    DuplicateLocale(String),

    #[error("Cannot delete {0:?}: at least one locale must remain")]
    LastLocale(String),

    #[error("Unknown locale {0:?}")]
    UnknownLocale(String),

    #[error("Locale code must not be blank")]
    EmptyLocaleCode,

    #[error("Invalid section type {0:?}: use about, timeline, projects or contact")]
    InvalidSectionType(String),

    #[error("No section at index {index} (locale has {len})")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("Field {0} is read-only")]
    ReadOnlyField(Path),

    #[error("No editable control is bound to {0}")]
    UnknownControl(Path),

    #[error("{value:?} is not a number (field {path})")]
    InvalidNumber { path: Path, value: String },

    #[error("{value:?} is not one of the choices for {path}")]
    InvalidChoice { path: Path, value: String },

    #[error("No item at index {index} in {path} (length {len})")]
    ItemOutOfRange { path: Path, index: usize, len: usize },

    #[error("Value at {0} is not a sequence")]
    NotASequence(Path),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
