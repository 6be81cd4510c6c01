//! Section list operations on the active locale.
//!
//! Section ids are unique and non-empty within a locale; new and duplicated
//! sections get an id derived from their type or source id with a numeric
//! suffix bumped until it is free.

use std::collections::HashSet;

use folio_path::Path;
use serde_json::Value;

use crate::templates::SectionKind;
use crate::{Document, EditorError};

impl Document {
    /// `["languages", <active>, "sections"]`
    pub fn sections_path(&self) -> Path {
        self.locale_path().key("sections")
    }

    pub fn sections(&self) -> &[Value] {
        self.sequence(&self.sections_path())
    }

    /// Append a freshly templated section of `kind` and return its index.
    pub fn add_section(&mut self, kind: &str) -> Result<usize, EditorError> {
        let kind: SectionKind = kind.parse()?;
        let position = self.sections().len();
        let id = self.unique_section_id((position + 1..).map(|n| format!("{kind}-{n}")));

        let path = self.sections_path();
        self.ensure_sequence(&path).push(kind.template(id.clone(), position));

        tracing::info!(kind = kind.as_str(), id = %id, "added section");
        Ok(position)
    }

    /// Remove the section at `index` and return it.
    pub fn remove_section(&mut self, index: usize) -> Result<Value, EditorError> {
        self.check_section(index)?;
        let path = self.sections_path();
        let removed = self.ensure_sequence(&path).remove(index);
        tracing::info!(index, "removed section");
        Ok(removed)
    }

    /// Insert a copy of the section at `index` right after it, under a new id.
    pub fn duplicate_section(&mut self, index: usize) -> Result<usize, EditorError> {
        self.check_section(index)?;
        let mut copy = self.sections()[index].clone();
        let base = copy
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(|id| format!("{id}-copy"))
            .unwrap_or_else(|| "section-copy".to_string());
        let id = self.unique_section_id(
            std::iter::once(base.clone()).chain((1..).map(|n| format!("{base}-{n}"))),
        );
        folio_path::set(&mut copy, &Path::root().key("id"), Value::String(id));

        let path = self.sections_path();
        self.ensure_sequence(&path).insert(index + 1, copy);
        tracing::info!(index, "duplicated section");
        Ok(index + 1)
    }

    /// Move the section at `from` so that it ends up at index `to`.
    pub fn move_section(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        self.check_section(from)?;
        self.check_section(to)?;
        if from == to {
            return Ok(());
        }
        let path = self.sections_path();
        let sections = self.ensure_sequence(&path);
        let section = sections.remove(from);
        sections.insert(to, section);
        tracing::info!(from, to, "moved section");
        Ok(())
    }

    fn check_section(&self, index: usize) -> Result<(), EditorError> {
        let len = self.sections().len();
        if index < len {
            Ok(())
        } else {
            Err(EditorError::SectionOutOfRange { index, len })
        }
    }

    /// First candidate not already used as an id in the active locale.
    fn unique_section_id(&self, mut candidates: impl Iterator<Item = String>) -> String {
        let taken: HashSet<&str> = self
            .sections()
            .iter()
            .filter_map(|section| section.get("id").and_then(Value::as_str))
            .collect();
        candidates
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Document {
        Document::from_value(json!({
            "defaultLanguage": "en",
            "languages": {
                "en": {
                    "sections": [
                        { "id": "about", "number": "01", "title": "About", "navLabel": "About", "type": "about" }
                    ]
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_add_timeline_section() {
        let mut doc = document();
        let index = doc.add_section("timeline").unwrap();
        assert_eq!(index, 1);

        let section = &doc.sections()[1];
        assert_eq!(section["type"], "timeline");
        assert_eq!(section["number"], "02");
        assert_eq!(section["id"], "timeline-2");
        assert_eq!(
            section["items"],
            json!([{ "role": "", "period": "", "achievements": [""] }])
        );
    }

    #[test]
    fn test_add_section_rejects_unknown_type() {
        let mut doc = document();
        let before = doc.root().clone();
        assert!(matches!(
            doc.add_section("gallery"),
            Err(EditorError::InvalidSectionType(_))
        ));
        assert_eq!(doc.root(), &before);
    }

    #[test]
    fn test_add_section_creates_missing_sequence() {
        let mut doc = Document::from_value(json!({ "languages": { "en": {} } })).unwrap();
        doc.add_section("about").unwrap();
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.sections()[0]["id"], "about-1");
    }

    #[test]
    fn test_section_ids_stay_unique() {
        let mut doc = document();
        doc.add_section("contact").unwrap();
        doc.remove_section(0).unwrap();
        doc.add_section("contact").unwrap();

        let ids: Vec<&str> = doc.sections().iter().map(|s| s["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["contact-2", "contact-3"]);
    }

    #[test]
    fn test_duplicate_section_inserts_after_with_new_id() {
        let mut doc = document();
        doc.duplicate_section(0).unwrap();
        doc.duplicate_section(0).unwrap();

        let ids: Vec<&str> = doc.sections().iter().map(|s| s["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["about", "about-copy-1", "about-copy"]);
    }

    #[test]
    fn test_move_and_remove_out_of_range() {
        let mut doc = document();
        doc.add_section("projects").unwrap();
        doc.move_section(1, 0).unwrap();
        assert_eq!(doc.sections()[0]["type"], "projects");

        assert!(matches!(
            doc.remove_section(5),
            Err(EditorError::SectionOutOfRange { index: 5, len: 2 })
        ));
        assert!(doc.move_section(0, 2).is_err());
    }
}
