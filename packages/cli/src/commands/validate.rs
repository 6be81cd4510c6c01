use super::ResourceArgs;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub resources: ResourceArgs,
}

pub async fn validate(args: ValidateArgs, config: &Config, cwd: &Path) -> Result<()> {
    let session = args.resources.open(config, cwd).await?;
    let report = session.report();
    let document = args.resources.document_path(config, cwd);

    if report.valid {
        println!("{} {}", "✓".green(), report.status_line());
        println!("   {}", document.display());
        return Ok(());
    }

    println!("{} {}", "✗".red(), report.status_line());
    for issue in &report.errors {
        println!("   {}", issue);
    }
    println!();

    Err(anyhow!(
        "{} failed schema validation ({} errors)",
        document.display(),
        report.errors.len()
    ))
}
