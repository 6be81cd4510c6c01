pub mod edit;
pub mod export;
pub mod form;
pub mod icons;
pub mod init;
pub mod validate;

pub use edit::{edit, EditArgs};
pub use export::{export, ExportArgs};
pub use form::{form, FormArgs};
pub use icons::icons;
pub use init::{init, InitArgs};
pub use validate::{validate, ValidateArgs};

use crate::config::Config;
use anyhow::Result;
use clap::Args;
use folio_editor::{load_resources, EditSession};
use std::path::{Path, PathBuf};

/// Which document and schema to open. Flags override the config file.
#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// Document to open (defaults to config documentPath)
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// JSON Schema to validate against (defaults to config schemaPath)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Do not assert string formats (email, uri, ...)
    #[arg(long)]
    pub no_formats: bool,
}

impl ResourceArgs {
    pub fn document_path(&self, config: &Config, cwd: &Path) -> PathBuf {
        match &self.document {
            Some(path) => cwd.join(path),
            None => config.document_path(cwd),
        }
    }

    pub fn schema_path(&self, config: &Config, cwd: &Path) -> PathBuf {
        match &self.schema {
            Some(path) => cwd.join(path),
            None => config.schema_path(cwd),
        }
    }

    /// Fetch both resources and build a validated session.
    pub async fn open(&self, config: &Config, cwd: &Path) -> Result<EditSession> {
        let resources = load_resources(
            self.document_path(config, cwd),
            self.schema_path(config, cwd),
        )
        .await?;
        let validate_formats = config.validate_formats && !self.no_formats;
        Ok(EditSession::from_resources(resources, validate_formats)?)
    }
}
