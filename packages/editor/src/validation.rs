//! # Validation Adapter
//!
//! Wraps a compiled JSON Schema and runs it against the whole document after
//! every mutation. The schema is authoritative: the editor adds no checks of
//! its own beyond the optional-field delete policy in the binder.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::EditorError;

/// Anything that can check a whole document and report problems.
pub trait Validate {
    fn validate(&self, document: &Value) -> ValidationReport;
}

/// One schema violation, located by its instance JSON Pointer. The document
/// root is `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut path = path.into();
        if path.is_empty() {
            path.push('/');
        }
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Result of validating the full document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        let errors: Vec<ValidationIssue> = errors
            .into_iter()
            .map(|issue| ValidationIssue::new(issue.path, issue.message))
            .collect();
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn status_line(&self) -> &'static str {
        if self.valid {
            "The document matches the schema."
        } else {
            "There are errors to fix."
        }
    }

    /// Issues whose instance path is exactly `pointer`.
    pub fn issues_at<'a>(&'a self, pointer: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.errors.iter().filter(move |issue| issue.path == pointer)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status_line())?;
        for issue in &self.errors {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

/// A JSON Schema compiled once at startup.
pub struct SchemaValidator {
    inner: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile with format assertions enabled (`email`, `uri`, ...).
    pub fn compile(schema: &Value) -> Result<Self, EditorError> {
        Self::compile_with(schema, true)
    }

    pub fn compile_with(schema: &Value, validate_formats: bool) -> Result<Self, EditorError> {
        let inner = jsonschema::options()
            .should_validate_formats(validate_formats)
            .build(schema)
            .map_err(|e| EditorError::SchemaCompile(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl Validate for SchemaValidator {
    fn validate(&self, document: &Value) -> ValidationReport {
        let errors = self
            .inner
            .iter_errors(document)
            .map(|error| ValidationIssue::new(error.instance_path.to_string(), error.to_string()))
            .collect();
        ValidationReport::from_issues(errors)
    }
}
