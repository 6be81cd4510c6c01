//! Replaying serialized edit scripts against the fixture document.

use folio_editor::{Document, Edit, EditSession, EditorError, PanelId, SchemaValidator};
use folio_path::path;
use serde_json::{json, Value};

fn session() -> EditSession {
    let document = Document::from_json(include_str!("fixtures/resume-data.json")).unwrap();
    let schema: Value = serde_json::from_str(include_str!("fixtures/resume.schema.json")).unwrap();
    EditSession::new(document, Box::new(SchemaValidator::compile(&schema).unwrap()))
}

fn replay(session: &mut EditSession, script: Value) -> Result<(), EditorError> {
    let edits: Vec<Edit> = serde_json::from_value(script)?;
    for edit in edits {
        session.apply(edit)?;
    }
    Ok(())
}

#[test]
fn test_build_contact_links() {
    let mut session = session();
    let links = json!(["languages", "es", "contact", "links"]);

    replay(
        &mut session,
        json!([
            { "op": "selectLocale", "code": "es" },
            { "op": "addItem", "path": links },
            { "op": "input", "path": ["languages", "es", "contact", "links", 0, "label"], "value": "LinkedIn" },
            { "op": "input", "path": ["languages", "es", "contact", "links", 0, "url"], "value": "https://linkedin.com/in/ada" },
            { "op": "input", "path": ["languages", "es", "contact", "links", 0, "icon"], "value": "linkedin" },
            { "op": "input", "path": ["languages", "es", "contact", "links", 0, "ariaLabel"], "value": "" },
            { "op": "duplicateItem", "path": links, "index": 0 }
        ]),
    )
    .unwrap();

    let stored = session.document().get(&path!["languages", "es", "contact", "links"]).unwrap();
    let expected = json!({ "label": "LinkedIn", "url": "https://linkedin.com/in/ada", "icon": "linkedin" });
    assert_eq!(stored, &json!([expected.clone(), expected]));
    assert!(session.report().valid, "{}", session.report());
}

#[test]
fn test_timeline_achievements() {
    let mut session = session();
    let achievements = path!["languages", "en", "sections", 1, "items", 0, "achievements"];

    replay(
        &mut session,
        json!([
            { "op": "addItem", "path": achievements },
            { "op": "input", "path": achievements.child(1), "value": "Published the first algorithm." },
            { "op": "removeItem", "path": achievements, "index": 0 }
        ]),
    )
    .unwrap();

    assert_eq!(
        session.document().get(&achievements),
        Some(&json!(["Published the first algorithm."]))
    );
}

#[test]
fn test_failed_step_stops_replay_but_keeps_earlier_steps() {
    let mut session = session();
    let skills = path!["languages", "en", "sections", 0, "skills"];

    let result = replay(
        &mut session,
        json!([
            { "op": "addItem", "path": skills },
            { "op": "removeItem", "path": skills, "index": 9 },
            { "op": "addItem", "path": skills }
        ]),
    );

    assert!(matches!(result, Err(EditorError::ItemOutOfRange { index: 9, len: 3, .. })));
    assert_eq!(session.document().sequence(&skills).len(), 3);
}

#[test]
fn test_section_reordering() {
    let mut session = session();

    replay(
        &mut session,
        json!([
            { "op": "addSection", "kind": "contact" },
            { "op": "moveSection", "from": 3, "to": 0 },
            { "op": "duplicateSection", "index": 0 },
            { "op": "removeSection", "index": 2 }
        ]),
    )
    .unwrap();

    let ids: Vec<&str> = session
        .document()
        .sections()
        .iter()
        .filter_map(|section| section["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["contact-4", "contact-4-copy", "experience", "projects"]);

    // The contact section's call to action is an optional toggle
    let cta = path!["languages", "en", "sections", 0, "cta"];
    session.apply(Edit::Toggle { path: cta.clone() }).unwrap();
    assert!(session.document().get(&cta).is_none());

    let panel = session.panel(PanelId::Sections).unwrap();
    let toggle = panel.find_toggle(&cta).unwrap();
    assert!(!toggle.is_present(session.document()));
}
