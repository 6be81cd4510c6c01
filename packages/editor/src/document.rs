//! # Document Store
//!
//! The single owner of the profile document being edited.
//!
//! Every other component reads through [`Document::get`] or mutates through
//! the path operations exposed here, so there is exactly one tree and no
//! private copies that could drift from it.
//!
//! ## Shape
//!
//! ```text
//! {
//!   "defaultLanguage": "en",
//!   "languages": {
//!     "en": { "language": {...}, "identity": {...}, "contact": {...}, "sections": [...] },
//!     "es": { ... }
//!   }
//! }
//! ```
//!
//! Locale-scoped paths are built with [`Document::scoped`], which prefixes
//! `["languages", <active locale>]`.

use std::path::Path as FsPath;

use folio_path::{ops, Path};
use serde_json::{Map, Value};

use crate::EditorError;

pub(crate) const LANGUAGES_KEY: &str = "languages";
pub(crate) const DEFAULT_LANGUAGE_KEY: &str = "defaultLanguage";

/// Editable multi-locale profile document
#[derive(Debug, Clone)]
pub struct Document {
    /// Increments on each successful mutation
    pub version: u64,

    root: Value,

    /// Locale whose variant the locale-scoped panels are editing
    active: String,
}

impl Document {
    /// Wrap a parsed document, checking the load-time invariants.
    pub fn from_value(root: Value) -> Result<Self, EditorError> {
        let Some(object) = root.as_object() else {
            return Err(EditorError::InvalidDocument(
                "top level must be an object".to_string(),
            ));
        };
        let languages = match object.get(LANGUAGES_KEY) {
            Some(Value::Object(languages)) if !languages.is_empty() => languages,
            Some(Value::Object(_)) => {
                return Err(EditorError::InvalidDocument(
                    "\"languages\" must contain at least one locale".to_string(),
                ))
            }
            _ => {
                return Err(EditorError::InvalidDocument(
                    "\"languages\" must be an object keyed by locale code".to_string(),
                ))
            }
        };

        let active = object
            .get(DEFAULT_LANGUAGE_KEY)
            .and_then(Value::as_str)
            .filter(|code| languages.contains_key(*code))
            .map(str::to_string)
            .or_else(|| languages.keys().next().cloned())
            .unwrap_or_default();

        Ok(Self {
            version: 0,
            root,
            active,
        })
    }

    /// Parse a document from JSON text.
    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        Self::from_value(serde_json::from_str(source)?)
    }

    /// Read-only view of the whole tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn active_locale(&self) -> &str {
        &self.active
    }

    pub(crate) fn set_active_locale(&mut self, code: String) {
        self.active = code;
    }

    /// `["languages", <active>]`
    pub fn locale_path(&self) -> Path {
        Path::root().key(LANGUAGES_KEY).key(self.active.clone())
    }

    /// Prefix a path relative to the active locale variant.
    pub fn scoped(&self, relative: &Path) -> Path {
        self.locale_path().join(relative)
    }

    pub fn get(&self, path: &Path) -> Option<&Value> {
        ops::get(&self.root, path)
    }

    /// Assign `value` at `path`, creating any missing containers.
    pub fn set(&mut self, path: &Path, value: Value) {
        tracing::debug!(path = %path, "set");
        ops::set(&mut self.root, path, value);
        self.version += 1;
    }

    /// Remove the node at `path`. Absent ancestors are a no-op.
    pub fn delete(&mut self, path: &Path) -> Option<Value> {
        tracing::debug!(path = %path, "delete");
        let removed = ops::delete(&mut self.root, path);
        if removed.is_some() {
            self.version += 1;
        }
        removed
    }

    /// Sequence at `path`, replacing an absent or non-sequence value with `[]`.
    pub fn ensure_sequence(&mut self, path: &Path) -> &mut Vec<Value> {
        self.version += 1;
        ops::ensure_sequence(&mut self.root, path)
    }

    /// Elements of the sequence at `path`, or an empty slice if there is none.
    pub fn sequence(&self, path: &Path) -> &[Value] {
        self.get(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn default_language(&self) -> Option<&str> {
        self.root.get(DEFAULT_LANGUAGE_KEY).and_then(Value::as_str)
    }

    /// Locale codes in stored order.
    pub fn locale_codes(&self) -> Vec<String> {
        self.languages()
            .map(|languages| languages.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_locale(&self, code: &str) -> bool {
        self.languages()
            .map(|languages| languages.contains_key(code))
            .unwrap_or(false)
    }

    pub(crate) fn languages(&self) -> Option<&Map<String, Value>> {
        self.root.get(LANGUAGES_KEY).and_then(Value::as_object)
    }

    pub(crate) fn languages_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.root.get_mut(LANGUAGES_KEY).and_then(Value::as_object_mut)
    }

    /// Canonical pretty-printed form used for preview and export.
    pub fn to_canonical_json(&self) -> String {
        // A `Value` always has string keys, so serialization cannot fail.
        serde_json::to_string_pretty(&self.root).unwrap_or_default()
    }

    /// Write the canonical serialization to disk.
    pub fn export(&self, destination: &FsPath) -> Result<(), EditorError> {
        let mut contents = self.to_canonical_json();
        contents.push('\n');
        std::fs::write(destination, contents)?;
        tracing::info!(path = %destination.display(), "exported document");
        Ok(())
    }
}
