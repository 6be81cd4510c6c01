//! # Locale Manager
//!
//! Structural operations on the `languages` mapping.
//!
//! Invariants kept by every operation here:
//! - the mapping is never empty
//! - `defaultLanguage` names an existing locale whenever it is set
//! - the active locale always exists
//!
//! Each operation checks everything it needs before touching the tree, so a
//! rejected call leaves the document exactly as it was.

use serde::Serialize;
use serde_json::Value;

use crate::document::DEFAULT_LANGUAGE_KEY;
use crate::{Document, EditorError};

const COPY_SUFFIX: &str = " (copy)";

/// Entry in the locale selector: `code · label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleOption {
    pub code: String,
    pub label: String,
}

/// The selectable set of locales and which one is being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleSelector {
    pub options: Vec<LocaleOption>,
    pub active: String,
    pub default: Option<String>,
    /// Deleting is disabled while only one locale remains
    pub can_delete: bool,
}

impl Document {
    /// Switch the locale-scoped panels to `code`.
    pub fn select_locale(&mut self, code: &str) -> Result<(), EditorError> {
        if !self.has_locale(code) {
            return Err(EditorError::UnknownLocale(code.to_string()));
        }
        self.set_active_locale(code.to_string());
        Ok(())
    }

    /// Point `defaultLanguage` at an existing locale.
    pub fn set_default_language(&mut self, code: &str) -> Result<(), EditorError> {
        if !self.has_locale(code) {
            return Err(EditorError::UnknownLocale(code.to_string()));
        }
        self.set(
            &folio_path::Path::root().key(DEFAULT_LANGUAGE_KEY),
            Value::String(code.to_string()),
        );
        Ok(())
    }

    /// Deep-copy `source` under `new_code` and make the copy active.
    ///
    /// The copy's `language.code` becomes the new code and its
    /// `language.label` gains a copy suffix; everything else is identical.
    /// Returns the trimmed code actually used.
    pub fn duplicate_locale(&mut self, source: &str, new_code: &str) -> Result<String, EditorError> {
        let code = new_code.trim();
        if code.is_empty() {
            return Err(EditorError::EmptyLocaleCode);
        }
        if self.has_locale(code) {
            return Err(EditorError::DuplicateLocale(code.to_string()));
        }
        let mut variant = self
            .languages()
            .and_then(|languages| languages.get(source))
            .cloned()
            .ok_or_else(|| EditorError::UnknownLocale(source.to_string()))?;

        let label = variant
            .pointer("/language/label")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let language = folio_path::Path::root().key("language");
        folio_path::set(&mut variant, &language.child("code"), Value::String(code.to_string()));
        folio_path::set(
            &mut variant,
            &language.child("label"),
            Value::String(format!("{label}{COPY_SUFFIX}")),
        );

        let Some(languages) = self.languages_mut() else {
            return Err(EditorError::InvalidDocument("\"languages\" is missing".to_string()));
        };
        languages.insert(code.to_string(), variant);
        self.version += 1;

        if self.default_language().map_or(true, str::is_empty) {
            self.set_default_language(code)?;
        }
        self.set_active_locale(code.to_string());

        tracing::info!(source, code, "duplicated locale");
        Ok(code.to_string())
    }

    /// Remove a locale, re-deriving the default and active codes.
    pub fn delete_locale(&mut self, code: &str) -> Result<(), EditorError> {
        if !self.has_locale(code) {
            return Err(EditorError::UnknownLocale(code.to_string()));
        }
        if self.locale_codes().len() <= 1 {
            return Err(EditorError::LastLocale(code.to_string()));
        }

        if let Some(languages) = self.languages_mut() {
            languages.shift_remove(code);
        }
        self.version += 1;

        let remaining = self.locale_codes();
        let default = match self.default_language() {
            Some(current) if remaining.iter().any(|c| c == current) => current.to_string(),
            _ => remaining.first().cloned().unwrap_or_default(),
        };
        if self.default_language() != Some(default.as_str()) {
            self.set_default_language(&default)?;
        }
        if !self.has_locale(self.active_locale()) {
            self.set_active_locale(default);
        }

        tracing::info!(code, active = self.active_locale(), "deleted locale");
        Ok(())
    }

    pub fn locale_selector(&self) -> LocaleSelector {
        let options: Vec<LocaleOption> = self
            .languages()
            .map(|languages| {
                languages
                    .iter()
                    .map(|(code, variant)| LocaleOption {
                        code: code.clone(),
                        label: variant
                            .pointer("/language/label")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        LocaleSelector {
            can_delete: options.len() > 1,
            options,
            active: self.active_locale().to_string(),
            default: self.default_language().map(str::to_string),
        }
    }
}
