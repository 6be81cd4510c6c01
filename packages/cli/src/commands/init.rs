use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Document path to record in the config
    #[arg(short, long)]
    pub document: Option<String>,

    /// Schema path to record in the config
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(document) = args.document {
        config.export_path = document.clone();
        config.document_path = document;
    }
    if let Some(schema) = args.schema {
        config.schema_path = schema;
    }

    let mut contents = serde_json::to_string_pretty(&config)?;
    contents.push('\n');
    fs::write(&config_path, contents)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    for (label, path) in [("document", &config.document_path), ("schema", &config.schema_path)] {
        if !cwd.join(path).exists() {
            println!("  {} No {} at {} yet", "⚠️".yellow(), label, path);
        }
    }

    Ok(())
}
