use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Document opened by every command
    #[serde(default = "default_document_path")]
    pub document_path: String,

    /// JSON Schema the document is validated against
    #[serde(default = "default_schema_path")]
    pub schema_path: String,

    /// Where `save` writes when no file is given
    #[serde(default = "default_export_path")]
    pub export_path: String,

    /// Assert string formats such as `email` and `uri`
    #[serde(default = "default_validate_formats")]
    pub validate_formats: bool,
}

fn default_document_path() -> String {
    "resume-data.json".to_string()
}

fn default_schema_path() -> String {
    "schemas/resume.schema.json".to_string()
}

fn default_export_path() -> String {
    "resume-data.json".to_string()
}

fn default_validate_formats() -> bool {
    true
}

impl Config {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", DEFAULT_CONFIG_NAME))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn document_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.document_path)
    }

    pub fn schema_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.schema_path)
    }

    pub fn export_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.export_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
            schema_path: default_schema_path(),
            export_path: default_export_path(),
            validate_formats: default_validate_formats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "documentPath": "data/profile.json",
            "schemaPath": "data/profile.schema.json",
            "validateFormats": false
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.document_path, "data/profile.json");
        assert_eq!(config.schema_path, "data/profile.schema.json");
        assert_eq!(config.export_path, "resume-data.json");
        assert!(!config.validate_formats);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.document_path, "resume-data.json");
        assert_eq!(config.schema_path, "schemas/resume.schema.json");
        assert!(config.validate_formats);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.schema_path(dir.path()),
            dir.path().join("schemas/resume.schema.json")
        );
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
