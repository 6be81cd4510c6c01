//! # Edit Session
//!
//! One user's editing session over one document.
//!
//! Every user action is an [`Edit`]. [`EditSession::apply`] runs it through
//! the same synchronous pipeline:
//!
//! ```text
//! Edit ─► resolve control in current form ─► mutate store
//!      ─► revalidate whole document ─► re-render affected panels
//!      ─► refresh canonical preview
//! ```
//!
//! Every store operation checks its preconditions before writing, so a
//! rejected edit returns before any step after resolution runs and the
//! document, report, panels and preview stay exactly as they were.

use std::collections::BTreeMap;
use std::path::Path as FsPath;

use folio_path::Path;
use serde::{Deserialize, Serialize};

use crate::binder::apply_input;
use crate::effects::EffectEngine;
use crate::form::{render_panel, Panel, PanelId};
use crate::loader::Resources;
use crate::structural::ListEditor;
use crate::validation::{SchemaValidator, Validate, ValidationReport};
use crate::{Document, EditorError};

/// A single user action. Paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Edit {
    /// Raw text typed into the field bound to `path`
    Input { path: Path, value: String },
    AddItem { path: Path },
    RemoveItem { path: Path, index: usize },
    DuplicateItem { path: Path, index: usize },
    /// Flip the optional substructure at `path`
    Toggle { path: Path },
    AddSection { kind: String },
    RemoveSection { index: usize },
    DuplicateSection { index: usize },
    MoveSection { from: usize, to: usize },
    SelectLocale { code: String },
    DuplicateLocale { source: String, code: String },
    DeleteLocale { code: String },
}

/// What an accepted edit changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub version: u64,
    pub panels: Vec<PanelId>,
    pub valid: bool,
    pub error_count: usize,
}

pub struct EditSession {
    document: Document,
    validator: Box<dyn Validate>,
    report: ValidationReport,
    panels: BTreeMap<PanelId, Panel>,
    preview: String,
    effects: EffectEngine,
}

impl EditSession {
    /// Create a session and run the initial validate + full render.
    pub fn new(document: Document, validator: Box<dyn Validate>) -> Self {
        let mut session = Self {
            document,
            validator,
            report: ValidationReport::default(),
            panels: BTreeMap::new(),
            preview: String::new(),
            effects: EffectEngine::new(),
        };
        session.refresh();
        session
    }

    /// Build a session from freshly loaded resources.
    pub fn from_resources(resources: Resources, validate_formats: bool) -> Result<Self, EditorError> {
        let validator = SchemaValidator::compile_with(&resources.schema, validate_formats)?;
        let document = Document::from_value(resources.document)?;
        Ok(Self::new(document, Box::new(validator)))
    }

    /// Apply one edit through the full pipeline.
    pub fn apply(&mut self, edit: Edit) -> Result<EditOutcome, EditorError> {
        let owner = match mutate(&self.panels, &mut self.document, &edit) {
            Ok(owner) => owner,
            Err(e) => {
                tracing::warn!(error = %e, ?edit, "edit rejected");
                return Err(e);
            }
        };

        self.report = self.validator.validate(self.document.root());
        let affected = self.effects.affected_panels(&edit, owner);
        for id in &affected {
            self.panels.insert(*id, render_panel(&self.document, *id));
        }
        self.preview = self.document.to_canonical_json();

        tracing::debug!(
            version = self.document.version,
            valid = self.report.valid,
            panels = affected.len(),
            "edit applied"
        );

        Ok(EditOutcome {
            version: self.document.version,
            panels: affected.into_iter().collect(),
            valid: self.report.valid,
            error_count: self.report.errors.len(),
        })
    }

    /// Revalidate and re-render everything from the current document.
    pub fn refresh(&mut self) {
        self.report = self.validator.validate(self.document.root());
        self.panels = PanelId::ALL
            .iter()
            .map(|id| (*id, render_panel(&self.document, *id)))
            .collect();
        self.preview = self.document.to_canonical_json();
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    /// Panels in display order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values()
    }

    /// Canonical serialization of the current document.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn export(&self, destination: &FsPath) -> Result<(), EditorError> {
        self.document.export(destination)
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Returns the panel owning the resolved control, if the edit targets one.
fn mutate(
    panels: &BTreeMap<PanelId, Panel>,
    doc: &mut Document,
    edit: &Edit,
) -> Result<Option<PanelId>, EditorError> {
    match edit {
        Edit::Input { path, value } => {
            let (owner, field) = panels
                .values()
                .find_map(|panel| panel.find_field(path).map(|field| (panel.id, field)))
                .ok_or_else(|| EditorError::UnknownControl(path.clone()))?;
            apply_input(doc, field, value)?;
            Ok(Some(owner))
        }
        Edit::AddItem { path } => {
            let (owner, list) = list_at(panels, path)?;
            list.add(doc);
            Ok(Some(owner))
        }
        Edit::RemoveItem { path, index } => {
            let (owner, list) = list_at(panels, path)?;
            list.remove(doc, *index)?;
            Ok(Some(owner))
        }
        Edit::DuplicateItem { path, index } => {
            let (owner, list) = list_at(panels, path)?;
            list.duplicate(doc, *index)?;
            Ok(Some(owner))
        }
        Edit::Toggle { path } => {
            let (owner, toggle) = panels
                .values()
                .find_map(|panel| panel.find_toggle(path).map(|toggle| (panel.id, toggle)))
                .ok_or_else(|| EditorError::UnknownControl(path.clone()))?;
            toggle.toggle(doc);
            Ok(Some(owner))
        }
        Edit::AddSection { kind } => doc.add_section(kind).map(|_| None),
        Edit::RemoveSection { index } => doc.remove_section(*index).map(|_| None),
        Edit::DuplicateSection { index } => doc.duplicate_section(*index).map(|_| None),
        Edit::MoveSection { from, to } => doc.move_section(*from, *to).map(|_| None),
        Edit::SelectLocale { code } => doc.select_locale(code).map(|_| None),
        Edit::DuplicateLocale { source, code } => doc.duplicate_locale(source, code).map(|_| None),
        Edit::DeleteLocale { code } => doc.delete_locale(code).map(|_| None),
    }
}

fn list_at<'a>(
    panels: &'a BTreeMap<PanelId, Panel>,
    path: &Path,
) -> Result<(PanelId, &'a ListEditor), EditorError> {
    panels
        .values()
        .find_map(|panel| panel.find_list(path).map(|list| (panel.id, list)))
        .ok_or_else(|| EditorError::UnknownControl(path.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationIssue;
    use folio_path::path;
    use serde_json::{json, Value};

    /// Flags every empty `name` under identity.
    struct NameRequired;

    impl Validate for NameRequired {
        fn validate(&self, document: &Value) -> ValidationReport {
            let issues = document["languages"]
                .as_object()
                .into_iter()
                .flatten()
                .filter(|(_, variant)| variant["identity"]["name"] == "")
                .map(|(code, _)| ValidationIssue {
                    path: format!("/languages/{code}/identity/name"),
                    message: "name must not be empty".to_string(),
                })
                .collect();
            ValidationReport::from_issues(issues)
        }
    }

    fn session() -> EditSession {
        let document = Document::from_value(json!({
            "defaultLanguage": "en",
            "languages": {
                "en": {
                    "language": { "code": "en", "label": "English" },
                    "identity": { "name": "Ada" },
                    "contact": { "links": [] },
                    "sections": []
                }
            }
        }))
        .unwrap();
        EditSession::new(document, Box::new(NameRequired))
    }

    #[test]
    fn test_input_revalidates_and_refreshes_preview() {
        let mut session = session();
        assert!(session.report().valid);

        let outcome = session
            .apply(Edit::Input {
                path: path!["languages", "en", "identity", "name"],
                value: String::new(),
            })
            .unwrap();

        assert!(!outcome.valid);
        assert_eq!(outcome.panels, vec![PanelId::Identity]);
        assert_eq!(session.report().errors[0].path, "/languages/en/identity/name");
        assert!(session.preview().contains("\"name\": \"\""));

        let field = session
            .panel(PanelId::Identity)
            .and_then(|panel| panel.find_field(&path!["languages", "en", "identity", "name"]))
            .unwrap();
        assert_eq!(field.value, "");
    }

    #[test]
    fn test_unbound_path_is_rejected() {
        let mut session = session();
        let before = session.preview().to_string();

        let result = session.apply(Edit::Input {
            path: path!["languages", "en", "secret"],
            value: "x".to_string(),
        });
        assert!(matches!(result, Err(EditorError::UnknownControl(_))));
        assert_eq!(session.preview(), before);
        assert_eq!(session.document().version, 0);
    }

    #[test]
    fn test_add_item_renders_new_item() {
        let mut session = session();
        let links = path!["languages", "en", "contact", "links"];
        session.apply(Edit::AddItem { path: links.clone() }).unwrap();

        let panel = session.panel(PanelId::Contact).unwrap();
        assert!(panel.find_field(&links.child(0).child("url")).is_some());
    }

    #[test]
    fn test_rejected_structural_edit_leaves_state() {
        let mut session = session();
        let result = session.apply(Edit::DeleteLocale { code: "en".to_string() });
        assert!(matches!(result, Err(EditorError::LastLocale(_))));
        assert_eq!(session.document().locale_codes(), vec!["en"]);
    }

    #[test]
    fn test_locale_switch_rebinds_panels() {
        let mut session = session();
        session
            .apply(Edit::DuplicateLocale {
                source: "en".to_string(),
                code: "fr".to_string(),
            })
            .unwrap();

        let identity = session.panel(PanelId::Identity).unwrap();
        assert!(identity.find_field(&path!["languages", "fr", "identity", "name"]).is_some());
        assert!(identity.find_field(&path!["languages", "en", "identity", "name"]).is_none());

        // Controls for the inactive locale are no longer bound
        let result = session.apply(Edit::Input {
            path: path!["languages", "en", "identity", "name"],
            value: "Grace".to_string(),
        });
        assert!(matches!(result, Err(EditorError::UnknownControl(_))));
    }

    #[test]
    fn test_edits_deserialize_from_op_tag() {
        let edit: Edit = serde_json::from_value(json!({
            "op": "duplicateItem",
            "path": ["languages", "en", "contact", "links"],
            "index": 0
        }))
        .unwrap();
        assert_eq!(
            edit,
            Edit::DuplicateItem {
                path: path!["languages", "en", "contact", "links"],
                index: 0
            }
        );
    }
}
