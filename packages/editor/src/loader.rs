//! Startup resource loading.
//!
//! The document and the schema are fetched concurrently and awaited together.
//! Either failure is fatal: no session is built from a partial load.

use std::path::Path as FsPath;

use serde_json::Value;

use crate::EditorError;

/// The two parsed inputs of an editing session.
#[derive(Debug, Clone)]
pub struct Resources {
    pub document: Value,
    pub schema: Value,
}

pub async fn load_resources(
    document: impl AsRef<FsPath>,
    schema: impl AsRef<FsPath>,
) -> Result<Resources, EditorError> {
    let (document, schema) = tokio::try_join!(
        read_json("document", document.as_ref()),
        read_json("schema", schema.as_ref()),
    )?;
    tracing::debug!("loaded document and schema");
    Ok(Resources { document, schema })
}

async fn read_json(resource: &str, path: &FsPath) -> Result<Value, EditorError> {
    let failed = |reason: String| EditorError::Load {
        resource: format!("{} ({})", resource, path.display()),
        reason,
    };

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| failed(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| failed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_loads_both_resources() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("resume-data.json");
        let schema = dir.path().join("resume.schema.json");
        fs::write(&document, r#"{ "languages": { "en": {} } }"#).unwrap();
        fs::write(&schema, r#"{ "type": "object" }"#).unwrap();

        let resources = load_resources(&document, &schema).await.unwrap();
        assert!(resources.document["languages"]["en"].is_object());
        assert_eq!(resources.schema["type"], "object");
    }

    #[tokio::test]
    async fn test_missing_schema_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("resume-data.json");
        fs::write(&document, "{}").unwrap();

        let result = load_resources(&document, dir.path().join("missing.json")).await;
        match result {
            Err(EditorError::Load { resource, .. }) => assert!(resource.starts_with("schema")),
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_document_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("resume-data.json");
        let schema = dir.path().join("resume.schema.json");
        fs::write(&document, "{ not json").unwrap();
        fs::write(&schema, "{}").unwrap();

        let result = load_resources(&document, &schema).await;
        assert!(matches!(result, Err(EditorError::Load { .. })));
    }
}
