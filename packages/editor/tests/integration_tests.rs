//! Integration tests for the editor crate, run against the fixture document
//! and schema.

use folio_editor::{
    load_resources, Document, Edit, EditSession, EditorError, PanelId, SchemaValidator, Validate,
};
use folio_path::{path, Path};
use serde_json::Value;
use std::path::PathBuf;

const DOCUMENT: &str = include_str!("fixtures/resume-data.json");
const SCHEMA: &str = include_str!("fixtures/resume.schema.json");

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn schema() -> Value {
    serde_json::from_str(SCHEMA).unwrap()
}

fn session() -> EditSession {
    let document = Document::from_json(DOCUMENT).unwrap();
    let validator = SchemaValidator::compile(&schema()).unwrap();
    EditSession::new(document, Box::new(validator))
}

fn input(path: Path, value: &str) -> Edit {
    Edit::Input {
        path,
        value: value.to_string(),
    }
}

#[test]
fn test_fixture_is_valid() {
    let session = session();
    assert!(session.report().valid, "{}", session.report());
    assert_eq!(session.report().status_line(), "The document matches the schema.");
    assert_eq!(session.document().active_locale(), "en");
}

#[test]
fn test_validation_is_deterministic() {
    let validator = SchemaValidator::compile(&schema()).unwrap();
    let mut document = Document::from_json(DOCUMENT).unwrap();
    document.set(&path!["languages", "en", "identity", "name"], Value::String(String::new()));
    document.set(&path!["languages", "en", "contact", "email"], Value::String("nope".into()));

    let first = validator.validate(document.root());
    let second = validator.validate(document.root());
    assert!(!first.valid);
    assert_eq!(first, second);
}

#[test]
fn test_invalid_email_is_reported_at_its_path() {
    let mut session = session();
    let email = path!["languages", "en", "contact", "email"];

    let outcome = session.apply(input(email.clone(), "not-an-email")).unwrap();
    assert!(!outcome.valid);
    assert_eq!(session.report().issues_at(&email.to_string()).count(), 1);
    assert_eq!(session.report().status_line(), "There are errors to fix.");

    // Fixing it clears the report
    let outcome = session.apply(input(email, "ada@lovelace.dev")).unwrap();
    assert!(outcome.valid);
}

#[test]
fn test_clearing_optional_aria_label_removes_key() {
    let mut session = session();
    let link = path!["languages", "en", "contact", "links", 0];
    let aria = link.child("ariaLabel");

    session.apply(input(aria.clone(), "")).unwrap();

    let stored = session.document().get(&link).unwrap();
    assert!(stored.get("ariaLabel").is_none());
    assert_eq!(session.report().issues_at(&aria.to_string()).count(), 0);
    assert!(session.report().valid);
}

#[test]
fn test_empty_required_string_is_kept_and_reported() {
    let mut session = session();
    let name = path!["languages", "en", "identity", "name"];

    session.apply(input(name.clone(), "")).unwrap();

    assert_eq!(session.document().get(&name), Some(&Value::String(String::new())));
    assert_eq!(session.report().issues_at(&name.to_string()).count(), 1);
}

#[test]
fn test_image_toggle_round_trip() {
    let mut session = session();
    let project = path!["languages", "en", "sections", 2, "items", 0];
    let before = session.document().get(&project).cloned();

    session.apply(Edit::Toggle { path: project.child("image") }).unwrap();
    let image = session.document().get(&project.child("image")).cloned();
    assert_eq!(image, Some(serde_json::json!({ "src": "", "alt": "" })));

    session.apply(Edit::Toggle { path: project.child("image") }).unwrap();
    assert_eq!(session.document().get(&project).cloned(), before);
}

#[test]
fn test_add_timeline_section() {
    let mut session = session();
    let outcome = session
        .apply(Edit::AddSection { kind: "Timeline".to_string() })
        .unwrap();
    assert_eq!(outcome.panels, vec![PanelId::Sections]);
    assert!(outcome.valid);

    let sections = session.document().sections();
    assert_eq!(sections.len(), 4);
    let added = &sections[3];
    assert_eq!(added["type"], "timeline");
    assert_eq!(added["number"], "04");
    assert_eq!(added["title"], "New section (timeline)");
    assert_eq!(added["items"][0]["achievements"], serde_json::json!([""]));
}

#[test]
fn test_invalid_section_type_changes_nothing() {
    let mut session = session();
    let before = session.preview().to_string();

    let result = session.apply(Edit::AddSection { kind: "gallery".to_string() });
    assert!(matches!(result, Err(EditorError::InvalidSectionType(_))));
    assert_eq!(session.preview(), before);
}

#[test]
fn test_duplicate_locale_then_edit_copy() {
    let mut session = session();
    session
        .apply(Edit::DuplicateLocale {
            source: "en".to_string(),
            code: "fr".to_string(),
        })
        .unwrap();

    let doc = session.document();
    assert_eq!(doc.active_locale(), "fr");
    assert_eq!(doc.locale_codes(), vec!["en", "es", "fr"]);
    assert_eq!(doc.root()["languages"]["fr"]["language"]["code"], "fr");
    assert_eq!(doc.root()["languages"]["fr"]["language"]["label"], "English (copy)");
    assert_eq!(doc.root()["languages"]["en"]["language"]["label"], "English");

    session
        .apply(input(path!["languages", "fr", "identity", "role"], "Programmeuse"))
        .unwrap();
    assert_eq!(
        session.document().root()["languages"]["en"]["identity"]["role"],
        "Analytical Engine Programmer"
    );

    let selector = session.panel(PanelId::LocaleSelector).unwrap().to_string();
    assert!(selector.contains("* fr · English (copy)"));
}

#[test]
fn test_duplicate_locale_with_taken_code_is_rejected() {
    let mut session = session();
    let result = session.apply(Edit::DuplicateLocale {
        source: "en".to_string(),
        code: "es".to_string(),
    });
    assert!(matches!(result, Err(EditorError::DuplicateLocale(_))));
    assert_eq!(session.document().active_locale(), "en");
}

#[test]
fn test_last_locale_cannot_be_deleted() {
    let mut session = session();
    session.apply(Edit::DeleteLocale { code: "es".to_string() }).unwrap();

    let result = session.apply(Edit::DeleteLocale { code: "en".to_string() });
    assert!(matches!(result, Err(EditorError::LastLocale(_))));
    assert_eq!(session.document().locale_codes(), vec!["en"]);
}

#[test]
fn test_deleting_default_locale_repoints_default() {
    let mut session = session();
    session.apply(Edit::DeleteLocale { code: "en".to_string() }).unwrap();

    let doc = session.document();
    assert_eq!(doc.default_language(), Some("es"));
    assert_eq!(doc.active_locale(), "es");
    assert!(session.report().valid);
}

#[test]
fn test_default_language_must_be_existing_code() {
    let mut session = session();
    let result = session.apply(input(path!["defaultLanguage"], "de"));
    assert!(matches!(result, Err(EditorError::InvalidChoice { .. })));

    session.apply(input(path!["defaultLanguage"], "es")).unwrap();
    assert_eq!(session.document().default_language(), Some("es"));
}

#[test]
fn test_preview_keeps_key_order() {
    let session = session();
    let preview = session.preview();
    assert!(preview.starts_with("{\n  \"defaultLanguage\": \"en\",\n  \"languages\": {"));
    assert!(preview.find("\"en\": {").unwrap() < preview.find("\"es\": {").unwrap());
}

#[test]
fn test_export_writes_canonical_form() {
    let mut session = session();
    session
        .apply(input(path!["languages", "en", "identity", "intro"], "Hello, I'm"))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("resume-data.json");
    session.export(&out).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, format!("{}\n", session.preview()));
    let reparsed: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(&reparsed, session.document().root());
}

#[tokio::test]
async fn test_session_from_loaded_resources() {
    let resources = load_resources(fixture("resume-data.json"), fixture("resume.schema.json"))
        .await
        .unwrap();
    let session = EditSession::from_resources(resources, true).unwrap();
    assert!(session.report().valid);
    assert_eq!(session.panels().count(), PanelId::ALL.len());
}

#[tokio::test]
async fn test_missing_document_is_fatal() {
    let result = load_resources(fixture("missing.json"), fixture("resume.schema.json")).await;
    assert!(matches!(result, Err(EditorError::Load { .. })));
}
