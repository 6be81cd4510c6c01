//! # Form Renderer
//!
//! Turns the document into a tree of panels and widgets. The tree is a pure
//! function of the document and the active locale: nothing here holds state
//! of its own, and every field value comes straight from the store.
//!
//! ## Panels
//!
//! | Panel            | Scope         | Contents                                   |
//! |------------------|---------------|--------------------------------------------|
//! | `LocaleSelector` | whole doc     | locale list, active code, delete guard     |
//! | `DefaultLanguage`| whole doc     | choice over the locale codes               |
//! | `Language`       | active locale | code (read-only), labels, SEO title        |
//! | `Identity`       | active locale | intro, name, role, summary                 |
//! | `Contact`        | active locale | email, download button, contact links      |
//! | `Sections`       | active locale | one editor per section                     |
//! | `IconReference`  | static        | social and tech icon tables                |
//!
//! Rendering is a full rebuild: stale widgets for paths that no longer exist
//! cannot survive a re-render because nothing is carried over.

use std::fmt::{self, Write as _};

use folio_path::{path, Path};
use serde::{Deserialize, Serialize};

use crate::binder::{bind_field, Choice, Field, FieldKind, FieldOptions};
use crate::document::DEFAULT_LANGUAGE_KEY;
use crate::icons::{icon_reference, IconEntry};
use crate::locales::LocaleSelector;
use crate::structural::{section_widget, ListEditor, OptionalEditor};
use crate::templates::{OptionalKind, RecordKind};
use crate::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelId {
    LocaleSelector,
    DefaultLanguage,
    Language,
    Identity,
    Contact,
    Sections,
    IconReference,
}

impl PanelId {
    pub const ALL: [PanelId; 7] = [
        PanelId::LocaleSelector,
        PanelId::DefaultLanguage,
        PanelId::Language,
        PanelId::Identity,
        PanelId::Contact,
        PanelId::Sections,
        PanelId::IconReference,
    ];

    /// Panels whose contents depend on the active locale.
    pub const LOCALE_SCOPED: [PanelId; 4] = [
        PanelId::Language,
        PanelId::Identity,
        PanelId::Contact,
        PanelId::Sections,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PanelId::LocaleSelector => "Languages",
            PanelId::DefaultLanguage => "Default language",
            PanelId::Language => "Language",
            PanelId::Identity => "Identity",
            PanelId::Contact => "Contact",
            PanelId::Sections => "Sections",
            PanelId::IconReference => "Icon reference",
        }
    }

    pub fn is_locale_scoped(&self) -> bool {
        Self::LOCALE_SCOPED.contains(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: PanelId,
    pub title: String,
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Field(Field),
    List(ListView),
    Toggle(ToggleView),
    Section(SectionView),
    Locales(LocaleSelector),
    Icons(Vec<IconEntry>),
    Helper(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub editor: ListEditor,
    pub items: Vec<ListItemView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItemView {
    pub index: usize,
    pub heading: String,
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleView {
    pub editor: OptionalEditor,
    pub title: String,
    pub present: bool,
    pub button_label: String,
    /// Shown in place of the fields while the substructure is absent
    pub helper: Option<String>,
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub index: usize,
    pub heading: String,
    pub section_type: String,
    pub header: Vec<Widget>,
    pub body: Vec<Widget>,
}

impl Widget {
    /// Directly nested widgets.
    pub fn children(&self) -> Vec<&Widget> {
        match self {
            Widget::List(list) => list.items.iter().flat_map(|item| item.widgets.iter()).collect(),
            Widget::Toggle(toggle) => toggle.widgets.iter().collect(),
            Widget::Section(section) => section.header.iter().chain(section.body.iter()).collect(),
            Widget::Field(_) | Widget::Locales(_) | Widget::Icons(_) | Widget::Helper(_) => Vec::new(),
        }
    }
}

/// Depth-first search for the first widget `pick` accepts.
fn find<'a, T>(
    widgets: impl IntoIterator<Item = &'a Widget>,
    pick: &impl Fn(&'a Widget) -> Option<T>,
) -> Option<T> {
    for widget in widgets {
        if let Some(found) = pick(widget) {
            return Some(found);
        }
        if let Some(found) = find(widget.children(), pick) {
            return Some(found);
        }
    }
    None
}

impl Panel {
    pub fn find_field(&self, path: &Path) -> Option<&Field> {
        find(&self.widgets, &|widget| match widget {
            Widget::Field(field) if &field.path == path => Some(field),
            _ => None,
        })
    }

    pub fn find_list(&self, path: &Path) -> Option<&ListEditor> {
        find(&self.widgets, &|widget| match widget {
            Widget::List(list) if &list.editor.path == path => Some(&list.editor),
            _ => None,
        })
    }

    pub fn find_toggle(&self, path: &Path) -> Option<&OptionalEditor> {
        find(&self.widgets, &|widget| match widget {
            Widget::Toggle(toggle) if &toggle.editor.path == path => Some(&toggle.editor),
            _ => None,
        })
    }

    /// Every field in the panel, in display order.
    pub fn fields(&self) -> Vec<&Field> {
        fn gather<'a>(widgets: impl IntoIterator<Item = &'a Widget>, out: &mut Vec<&'a Field>) {
            for widget in widgets {
                if let Widget::Field(field) = widget {
                    out.push(field);
                }
                gather(widget.children(), out);
            }
        }

        let mut out = Vec::new();
        gather(&self.widgets, &mut out);
        out
    }
}

/// Build one panel from the current document.
pub fn render_panel(doc: &Document, id: PanelId) -> Panel {
    let widgets = match id {
        PanelId::LocaleSelector => vec![Widget::Locales(doc.locale_selector())],
        PanelId::DefaultLanguage => default_language_widgets(doc),
        PanelId::Language => language_widgets(doc),
        PanelId::Identity => identity_widgets(doc),
        PanelId::Contact => contact_widgets(doc),
        PanelId::Sections => sections_widgets(doc),
        PanelId::IconReference => vec![Widget::Icons(icon_reference())],
    };

    Panel {
        id,
        title: id.title().to_string(),
        widgets,
    }
}

pub fn render_all(doc: &Document) -> Vec<Panel> {
    PanelId::ALL.iter().map(|id| render_panel(doc, *id)).collect()
}

fn default_language_widgets(doc: &Document) -> Vec<Widget> {
    let choices = doc
        .locale_selector()
        .options
        .into_iter()
        .map(|option| {
            let label = format!("{} · {}", option.code, option.label);
            Choice::new(option.code, label)
        })
        .collect();

    vec![
        Widget::Field(bind_field(
            doc,
            "Code",
            Path::root().key(DEFAULT_LANGUAGE_KEY),
            FieldOptions::choices(choices),
        )),
        Widget::Helper("Sets which language loads first when someone visits the profile.".to_string()),
    ]
}

fn language_widgets(doc: &Document) -> Vec<Widget> {
    let field = |label: &str, relative: Path| {
        Widget::Field(bind_field(doc, label, doc.scoped(&relative), FieldOptions::text()))
    };

    vec![
        field("Code", path!["language", "code"]),
        field("Label", path!["language", "label"]),
        field("Short label", path!["language", "shortLabel"]),
        field("Locale", path!["locale"]),
        field("SEO title", path!["metaTitle"]),
        Widget::Helper("To change the code, duplicate the language and edit its texts.".to_string()),
    ]
}

fn identity_widgets(doc: &Document) -> Vec<Widget> {
    let field = |label: &str, key: &str, options: FieldOptions| {
        Widget::Field(bind_field(doc, label, doc.scoped(&path!["identity", key]), options))
    };

    vec![
        field("Intro", "intro", FieldOptions::text()),
        field("Name", "name", FieldOptions::text()),
        field("Role", "role", FieldOptions::text()),
        field("Summary", "summary", FieldOptions::multiline(Some(4))),
    ]
}

fn contact_widgets(doc: &Document) -> Vec<Widget> {
    let contact = doc.scoped(&path!["contact"]);

    vec![
        Widget::Field(bind_field(doc, "Email", contact.child("email"), FieldOptions::email())),
        OptionalEditor::new(contact.child("download"), OptionalKind::DownloadButton).render(doc),
        ListEditor::records(contact.child("links"), RecordKind::ContactLink).render(doc),
    ]
}

fn sections_widgets(doc: &Document) -> Vec<Widget> {
    let widgets: Vec<Widget> = (0..doc.sections().len())
        .filter_map(|index| section_widget(doc, index))
        .collect();

    if widgets.is_empty() {
        vec![Widget::Helper("There are no sections for this language yet.".to_string())]
    } else {
        widgets
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        let mut out = String::new();
        write_widgets(&mut out, &self.widgets, 1)?;
        f.write_str(&out)
    }
}

fn write_widgets(out: &mut String, widgets: &[Widget], depth: usize) -> fmt::Result {
    for widget in widgets {
        write_widget(out, widget, depth)?;
    }
    Ok(())
}

fn write_widget(out: &mut String, widget: &Widget, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);

    match widget {
        Widget::Field(field) => {
            let mut flags = String::new();
            if field.readonly {
                flags.push_str(" (read-only)");
            }
            if field.optional {
                flags.push_str(" (optional)");
            }
            write!(out, "{indent}{}{flags}: {:?}  [{}]", field.label, field.value, field.path)?;
            if let FieldKind::Choice { choices } = &field.kind {
                let values: Vec<&str> = choices.iter().map(|c| c.value.as_str()).collect();
                write!(out, " one of {values:?}")?;
            }
            writeln!(out)
        }
        Widget::List(list) => {
            writeln!(
                out,
                "{indent}{} [{}] ({} items, \"{}\")",
                list.editor.title,
                list.editor.path,
                list.items.len(),
                list.editor.add_label
            )?;
            for item in &list.items {
                writeln!(out, "{indent}  - {}", item.heading)?;
                write_widgets(out, &item.widgets, depth + 2)?;
            }
            Ok(())
        }
        Widget::Toggle(toggle) => {
            let state = if toggle.present { "present" } else { "absent" };
            writeln!(
                out,
                "{indent}{} [{}] ({state}, \"{}\")",
                toggle.title, toggle.editor.path, toggle.button_label
            )?;
            if let Some(helper) = &toggle.helper {
                writeln!(out, "{indent}  {helper}")?;
            }
            write_widgets(out, &toggle.widgets, depth + 1)
        }
        Widget::Section(section) => {
            writeln!(
                out,
                "{indent}Section {}: {} (type: {})",
                section.index, section.heading, section.section_type
            )?;
            write_widgets(out, &section.header, depth + 1)?;
            write_widgets(out, &section.body, depth + 1)
        }
        Widget::Locales(selector) => {
            for option in &selector.options {
                let marker = if option.code == selector.active { "*" } else { " " };
                let default = if selector.default.as_deref() == Some(option.code.as_str()) {
                    " (default)"
                } else {
                    ""
                };
                writeln!(out, "{indent}{marker} {} · {}{default}", option.code, option.label)?;
            }
            if !selector.can_delete {
                writeln!(out, "{indent}At least one language must remain.")?;
            }
            Ok(())
        }
        Widget::Icons(entries) => {
            for entry in entries {
                writeln!(out, "{indent}{:<12} {:<7} {}", entry.slug, format!("{:?}", entry.category), entry.path)?;
            }
            Ok(())
        }
        Widget::Helper(text) => writeln!(out, "{indent}{text}"),
    }
}
