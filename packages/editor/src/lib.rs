//! # Folio Editor
//!
//! Schema-validated editing engine for multi-locale profile documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ loader: document + schema, fetched together │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: Edit → mutate → revalidate         │
//! │  - field binder (scalar controls)           │
//! │  - structural editors (lists, toggles)      │
//! │  - locale manager / section operations      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ form: Document → panels → widgets           │
//! │ preview: canonical pretty-printed JSON      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is source of truth**: panels and preview are derived views
//! 2. **Schema is authoritative**: the editor never blocks invalid content,
//!    it reports it
//! 3. **Optional means absent**: clearing an optional field removes the key
//! 4. **Atomic edits**: a rejected edit changes nothing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{load_resources, Edit, EditSession};
//! use folio_path::path;
//!
//! let resources = load_resources("resume-data.json", "schemas/resume.schema.json").await?;
//! let mut session = EditSession::from_resources(resources, true)?;
//!
//! session.apply(Edit::Input {
//!     path: path!["languages", "en", "identity", "name"],
//!     value: "Ada Lovelace".to_string(),
//! })?;
//!
//! println!("{}", session.report());
//! session.export("resume-data.json".as_ref())?;
//! ```

mod binder;
mod document;
mod effects;
mod errors;
mod form;
mod icons;
mod loader;
mod locales;
mod sections;
mod session;
mod structural;
mod templates;
mod validation;

pub use binder::{apply_input, bind_field, Choice, Field, FieldKind, FieldOptions, FieldWrite};
pub use document::Document;
pub use effects::{EffectEngine, RenderEffect};
pub use errors::EditorError;
pub use form::{
    render_all, render_panel, ListItemView, ListView, Panel, PanelId, SectionView, ToggleView, Widget,
};
pub use icons::{icon_reference, link_icon_choices, social_icon_path, tech_icon_path, IconCategory, IconEntry};
pub use loader::{load_resources, Resources};
pub use locales::{LocaleOption, LocaleSelector};
pub use session::{Edit, EditOutcome, EditSession};
pub use structural::{section_widget, ItemTemplate, ListEditor, OptionalEditor};
pub use templates::{OptionalKind, RecordKind, SectionKind};
pub use validation::{SchemaValidator, Validate, ValidationIssue, ValidationReport};
