//! # Field Binder
//!
//! Binds one editable control to one document path.
//!
//! [`bind_field`] reads the current value and produces a [`Field`] view;
//! [`apply_input`] takes the raw text a user typed into that field and writes
//! it back through the document store:
//!
//! ```text
//! raw input ─► optional && blank? ─► delete(path)
//!                      │
//!                      └─► coerce (number/choice) ─► set(path, value)
//! ```
//!
//! Clearing an optional field removes its key instead of storing `""`, which
//! is what keeps optional substructures from ever being half present.

use folio_path::Path;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::{Document, EditorError};

/// One entry of an enumerated choice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Multiline { rows: Option<u16> },
    Choice { choices: Vec<Choice> },
}

/// How a field is rendered and how its input is written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions {
    pub kind: FieldKind,
    /// Blank input deletes the key instead of storing an empty string
    pub optional: bool,
    pub readonly: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            kind: FieldKind::Text,
            optional: false,
            readonly: false,
        }
    }
}

impl FieldOptions {
    pub fn text() -> Self {
        Self::default()
    }

    pub fn email() -> Self {
        Self::with_kind(FieldKind::Email)
    }

    pub fn number() -> Self {
        Self::with_kind(FieldKind::Number)
    }

    pub fn multiline(rows: Option<u16>) -> Self {
        Self::with_kind(FieldKind::Multiline { rows })
    }

    pub fn choices(choices: Vec<Choice>) -> Self {
        Self::with_kind(FieldKind::Choice { choices })
    }

    fn with_kind(kind: FieldKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

/// A rendered control: label, bound path and the value it currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: String,
    pub path: Path,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub optional: bool,
    pub readonly: bool,
    pub value: String,
}

/// What a field write did to the document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWrite {
    Set(Value),
    Deleted,
}

/// Render a control for `path`, showing the document's current value.
///
/// The active locale's own `language.code` is always read-only and shows the
/// locale key. Codes change only by duplicating a locale.
pub fn bind_field(
    doc: &Document,
    label: impl Into<String>,
    path: Path,
    options: FieldOptions,
) -> Field {
    let is_locale_code = path == locale_code_path(doc);
    let value = if is_locale_code {
        doc.active_locale().to_string()
    } else {
        display_value(doc.get(&path))
    };

    Field {
        label: label.into(),
        path,
        kind: options.kind,
        optional: options.optional,
        readonly: options.readonly || is_locale_code,
        value,
    }
}

/// Write raw user input for `field` into the document.
///
/// Rejected input (read-only field, unparseable number, value outside the
/// choice list) leaves the document untouched.
pub fn apply_input(doc: &mut Document, field: &Field, raw: &str) -> Result<FieldWrite, EditorError> {
    if field.readonly || field.path == locale_code_path(doc) {
        return Err(EditorError::ReadOnlyField(field.path.clone()));
    }

    if field.optional && raw.trim().is_empty() {
        doc.delete(&field.path);
        return Ok(FieldWrite::Deleted);
    }

    let value = coerce(field, raw)?;
    doc.set(&field.path, value.clone());
    Ok(FieldWrite::Set(value))
}

fn coerce(field: &Field, raw: &str) -> Result<Value, EditorError> {
    match &field.kind {
        FieldKind::Number if raw.is_empty() => Ok(Value::String(String::new())),
        FieldKind::Number => parse_number(raw.trim()).ok_or_else(|| EditorError::InvalidNumber {
            path: field.path.clone(),
            value: raw.to_string(),
        }),
        FieldKind::Choice { choices } => {
            if choices.iter().any(|choice| choice.value == raw) {
                Ok(Value::String(raw.to_string()))
            } else {
                Err(EditorError::InvalidChoice {
                    path: field.path.clone(),
                    value: raw.to_string(),
                })
            }
        }
        FieldKind::Text | FieldKind::Email | FieldKind::Multiline { .. } => {
            Ok(Value::String(raw.to_string()))
        }
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(integer) = raw.parse::<i64>() {
        return Some(Value::Number(integer.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn locale_code_path(doc: &Document) -> Path {
    doc.locale_path().key("language").key("code")
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => String::new(),
    }
}
