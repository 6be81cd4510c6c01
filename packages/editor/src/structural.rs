//! # Structural Editors
//!
//! Composite editors for the parts of the document that are not single
//! scalars:
//!
//! - [`ListEditor`]: a sequence of scalars or of records, with add, remove
//!   and duplicate. New elements come from [`ItemTemplate`].
//! - [`OptionalEditor`]: a substructure that is either absent or present with
//!   its full template shape, flipped by a single toggle.
//! - [`section_widget`]: dispatches on a section's `type` tag and composes the
//!   sub-editors valid for that variant.
//!
//! Editors are plain descriptors (a path plus labels and a template). They are
//! cloned into the rendered views so an edit can find its editor again by
//! path.

use folio_path::Path;
use serde_json::Value;

use crate::binder::{bind_field, FieldOptions};
use crate::form::{ListItemView, ListView, SectionView, ToggleView, Widget};
use crate::icons::link_icon_choices;
use crate::templates::{OptionalKind, RecordKind, SectionKind};
use crate::{Document, EditorError};

/// Shape of a new list element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemTemplate {
    /// An empty string, edited as single-line or multiline text
    Scalar { multiline: bool },
    Record(RecordKind),
}

impl ItemTemplate {
    pub fn instantiate(&self) -> Value {
        match self {
            ItemTemplate::Scalar { .. } => Value::String(String::new()),
            ItemTemplate::Record(kind) => kind.template(),
        }
    }
}

/// Editor for an ordered sequence at `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEditor {
    pub path: Path,
    pub title: String,
    pub add_label: String,
    pub item_label: String,
    pub template: ItemTemplate,
}

impl ListEditor {
    pub fn scalars(
        path: Path,
        title: impl Into<String>,
        add_label: impl Into<String>,
        item_label: impl Into<String>,
    ) -> Self {
        Self {
            path,
            title: title.into(),
            add_label: add_label.into(),
            item_label: item_label.into(),
            template: ItemTemplate::Scalar { multiline: false },
        }
    }

    pub fn multiline(mut self) -> Self {
        self.template = ItemTemplate::Scalar { multiline: true };
        self
    }

    pub fn records(path: Path, kind: RecordKind) -> Self {
        let (title, add_label, item_label) = match kind {
            RecordKind::TimelineRole => ("Experience", "Add role", "Role"),
            RecordKind::Project => ("Projects", "Add project", "Project"),
            RecordKind::ProjectLink => ("Project links", "Add link", "Link"),
            RecordKind::ContactLink => ("Contact links", "Add link", "Link"),
        };
        Self {
            path,
            title: title.to_string(),
            add_label: add_label.to_string(),
            item_label: item_label.to_string(),
            template: ItemTemplate::Record(kind),
        }
    }

    /// Append a new element and return its index.
    pub fn add(&self, doc: &mut Document) -> usize {
        let items = doc.ensure_sequence(&self.path);
        items.push(self.template.instantiate());
        items.len() - 1
    }

    /// Splice out the element at `index`.
    pub fn remove(&self, doc: &mut Document, index: usize) -> Result<Value, EditorError> {
        self.check(doc, index)?;
        doc.delete(&self.path.child(index))
            .ok_or_else(|| EditorError::NotASequence(self.path.clone()))
    }

    /// Insert a copy of the element at `index` right after it.
    pub fn duplicate(&self, doc: &mut Document, index: usize) -> Result<usize, EditorError> {
        self.check(doc, index)?;
        let copy = doc.sequence(&self.path)[index].clone();
        doc.ensure_sequence(&self.path).insert(index + 1, copy);
        Ok(index + 1)
    }

    fn check(&self, doc: &Document, index: usize) -> Result<(), EditorError> {
        let len = doc.sequence(&self.path).len();
        if index < len {
            Ok(())
        } else {
            Err(EditorError::ItemOutOfRange {
                path: self.path.clone(),
                index,
                len,
            })
        }
    }

    pub fn render(&self, doc: &Document) -> Widget {
        let items = (0..doc.sequence(&self.path).len())
            .map(|index| ListItemView {
                index,
                heading: format!("{} {}", self.item_label, index + 1),
                widgets: self.item_widgets(doc, self.path.child(index)),
            })
            .collect();

        Widget::List(ListView {
            editor: self.clone(),
            items,
        })
    }

    fn item_widgets(&self, doc: &Document, item: Path) -> Vec<Widget> {
        let field = |label: &str, key: &str, options: FieldOptions| {
            Widget::Field(bind_field(doc, label, item.child(key), options))
        };

        match self.template {
            ItemTemplate::Scalar { multiline } => {
                let options = if multiline {
                    FieldOptions::multiline(None)
                } else {
                    FieldOptions::text()
                };
                vec![Widget::Field(bind_field(doc, self.item_label.clone(), item.clone(), options))]
            }
            ItemTemplate::Record(RecordKind::TimelineRole) => vec![
                field("Role", "role", FieldOptions::text()),
                field("Period", "period", FieldOptions::text()),
                ListEditor::scalars(item.child("achievements"), "Achievements", "Add achievement", "Achievement")
                    .multiline()
                    .render(doc),
            ],
            ItemTemplate::Record(RecordKind::Project) => vec![
                field("Name", "name", FieldOptions::text()),
                field("Short label", "label", FieldOptions::text()),
                field("Description", "description", FieldOptions::multiline(Some(4))),
                ListEditor::scalars(item.child("stack"), "Stack", "Add technology", "Technology").render(doc),
                ListEditor::records(item.child("links"), RecordKind::ProjectLink).render(doc),
                OptionalEditor::new(item.child("image"), OptionalKind::ProjectImage).render(doc),
            ],
            ItemTemplate::Record(RecordKind::ProjectLink) => vec![
                field("Label", "label", FieldOptions::text()),
                field("URL", "url", FieldOptions::text()),
                field("Aria label", "ariaLabel", FieldOptions::text().optional()),
            ],
            ItemTemplate::Record(RecordKind::ContactLink) => vec![
                field("Label", "label", FieldOptions::text()),
                field("URL", "url", FieldOptions::text()),
                field("Aria label", "ariaLabel", FieldOptions::text().optional()),
                field("Icon", "icon", FieldOptions::choices(link_icon_choices()).optional()),
            ],
        }
    }
}

/// Presence toggle for an optional substructure at `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalEditor {
    pub path: Path,
    pub kind: OptionalKind,
}

impl OptionalEditor {
    pub fn new(path: Path, kind: OptionalKind) -> Self {
        Self { path, kind }
    }

    pub fn is_present(&self, doc: &Document) -> bool {
        doc.get(&self.path).is_some_and(|value| !value.is_null())
    }

    /// Write the full template when absent, delete the whole key when
    /// present. Returns whether the substructure is present afterwards.
    pub fn toggle(&self, doc: &mut Document) -> bool {
        if self.is_present(doc) {
            doc.delete(&self.path);
            false
        } else {
            doc.set(&self.path, self.kind.template());
            true
        }
    }

    pub fn render(&self, doc: &Document) -> Widget {
        let present = self.is_present(doc);
        let (title, add, remove, helper) = match self.kind {
            OptionalKind::DownloadButton => (
                "Download button",
                "Add download button",
                "Remove download button",
                None,
            ),
            OptionalKind::ProjectImage => (
                "Image",
                "Add image",
                "Remove image",
                Some("Add an image to show a preview of the project."),
            ),
            OptionalKind::CallToAction => (
                "Call to action",
                "Add CTA",
                "Remove CTA",
                Some("Add an action to show a contact button."),
            ),
        };

        let widgets = if present { self.fields(doc) } else { Vec::new() };
        Widget::Toggle(ToggleView {
            editor: self.clone(),
            title: title.to_string(),
            present,
            button_label: if present { remove } else { add }.to_string(),
            helper: if present { None } else { helper.map(str::to_string) },
            widgets,
        })
    }

    fn fields(&self, doc: &Document) -> Vec<Widget> {
        let field = |label: &str, key: &str, options: FieldOptions| {
            Widget::Field(bind_field(doc, label, self.path.child(key), options))
        };

        match self.kind {
            OptionalKind::DownloadButton => vec![
                field("Button label", "label", FieldOptions::text()),
                field("Aria label", "ariaLabel", FieldOptions::text()),
                field("Tooltip", "tooltip", FieldOptions::text()),
                field("URL", "url", FieldOptions::text()),
                field("File name", "filename", FieldOptions::text()),
            ],
            OptionalKind::ProjectImage => vec![
                field("Source (src)", "src", FieldOptions::text()),
                field("Alt text", "alt", FieldOptions::text()),
                field("Caption", "caption", FieldOptions::text().optional()),
            ],
            OptionalKind::CallToAction => vec![
                field("Label", "label", FieldOptions::text()),
                field("URL", "url", FieldOptions::text()),
            ],
        }
    }
}

/// Editor for the section at `index` of the active locale.
///
/// The common fields are always rendered; the body depends on the `type`
/// tag. A tag outside the known set renders no body.
pub fn section_widget(doc: &Document, index: usize) -> Option<Widget> {
    let section = doc.sections().get(index)?;
    let base = doc.sections_path().child(index);

    let header = vec![
        Widget::Field(bind_field(doc, "Identifier", base.child("id"), FieldOptions::text())),
        Widget::Field(bind_field(doc, "Number", base.child("number"), FieldOptions::text())),
        Widget::Field(bind_field(doc, "Title", base.child("title"), FieldOptions::text())),
        Widget::Field(bind_field(doc, "Navigation label", base.child("navLabel"), FieldOptions::text())),
    ];
    let body = match SectionKind::of(section) {
        Some(kind) => section_body(doc, &base, kind),
        None => Vec::new(),
    };

    Some(Widget::Section(SectionView {
        index,
        heading: format!("{} · {}", text(section, "number"), text(section, "title")),
        section_type: text(section, "type").to_string(),
        header,
        body,
    }))
}

fn text<'a>(section: &'a Value, key: &str) -> &'a str {
    section.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn section_body(doc: &Document, base: &Path, kind: SectionKind) -> Vec<Widget> {
    let paragraphs = || {
        ListEditor::scalars(base.child("paragraphs"), "Paragraphs", "Add paragraph", "Paragraph")
            .multiline()
            .render(doc)
    };

    match kind {
        SectionKind::About => vec![
            paragraphs(),
            ListEditor::scalars(base.child("skills"), "Featured skills", "Add skill", "Skill").render(doc),
        ],
        SectionKind::Timeline => {
            vec![ListEditor::records(base.child("items"), RecordKind::TimelineRole).render(doc)]
        }
        SectionKind::Projects => {
            vec![ListEditor::records(base.child("items"), RecordKind::Project).render(doc)]
        }
        SectionKind::Contact => vec![
            paragraphs(),
            OptionalEditor::new(base.child("cta"), OptionalKind::CallToAction).render(doc),
        ],
    }
}
