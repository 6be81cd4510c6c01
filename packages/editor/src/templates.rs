//! # Templates
//!
//! Default-shaped values inserted when a new element or optional
//! substructure is created. Each shape has exactly one constructor here; the
//! structural editors never build element values inline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::EditorError;

/// The closed set of section variants, keyed by the section's `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    About,
    Timeline,
    Projects,
    Contact,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::About,
        SectionKind::Timeline,
        SectionKind::Projects,
        SectionKind::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::About => "about",
            SectionKind::Timeline => "timeline",
            SectionKind::Projects => "projects",
            SectionKind::Contact => "contact",
        }
    }

    /// Kind of a stored section value. The `type` tag must match exactly;
    /// only user input goes through the lenient [`FromStr`] parse.
    pub fn of(section: &Value) -> Option<Self> {
        let tag = section.get("type").and_then(Value::as_str)?;
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// New section of this kind at `position` (0-based) in its locale.
    pub fn template(&self, id: String, position: usize) -> Value {
        let mut section = json!({
            "id": id,
            "number": format!("{:02}", position + 1),
            "title": format!("New section ({})", self.as_str()),
            "navLabel": "New section",
            "type": self.as_str(),
        });

        let body = match self {
            SectionKind::About => json!({
                "paragraphs": [""],
                "skills": [""],
            }),
            SectionKind::Timeline => json!({
                "items": [RecordKind::TimelineRole.template()],
            }),
            SectionKind::Projects => json!({
                "items": [RecordKind::Project.template()],
            }),
            SectionKind::Contact => json!({
                "paragraphs": [""],
                "cta": OptionalKind::CallToAction.template(),
            }),
        };

        if let (Some(section), Value::Object(body)) = (section.as_object_mut(), body) {
            section.extend(body);
        }
        section
    }
}

impl FromStr for SectionKind {
    type Err = EditorError;

    /// Accepts the tag case-insensitively, ignoring surrounding whitespace.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "about" => Ok(SectionKind::About),
            "timeline" => Ok(SectionKind::Timeline),
            "projects" => Ok(SectionKind::Projects),
            "contact" => Ok(SectionKind::Contact),
            _ => Err(EditorError::InvalidSectionType(input.to_string())),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element shapes of the record sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    TimelineRole,
    Project,
    ProjectLink,
    ContactLink,
}

impl RecordKind {
    pub fn template(&self) -> Value {
        match self {
            RecordKind::TimelineRole => json!({
                "role": "",
                "period": "",
                "achievements": [""],
            }),
            RecordKind::Project => json!({
                "name": "",
                "label": "",
                "description": "",
                "stack": [""],
                "links": [],
                "image": OptionalKind::ProjectImage.template(),
            }),
            RecordKind::ProjectLink | RecordKind::ContactLink => json!({
                "label": "",
                "url": "",
                "ariaLabel": "",
            }),
        }
    }
}

/// Optional substructures: either absent or present with their full shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionalKind {
    DownloadButton,
    ProjectImage,
    CallToAction,
}

impl OptionalKind {
    pub fn template(&self) -> Value {
        match self {
            OptionalKind::DownloadButton => json!({
                "label": "",
                "ariaLabel": "",
                "tooltip": "",
                "url": "",
                "filename": "",
            }),
            OptionalKind::ProjectImage => json!({ "src": "", "alt": "" }),
            OptionalKind::CallToAction => json!({ "label": "", "url": "" }),
        }
    }
}
