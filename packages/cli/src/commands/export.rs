use super::ResourceArgs;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub resources: ResourceArgs,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub async fn export(args: ExportArgs, config: &Config, cwd: &Path) -> Result<()> {
    let session = args.resources.open(config, cwd).await?;

    match args.out {
        Some(out) => {
            let out = cwd.join(out);
            session.export(&out)?;
            eprintln!("{} Exported {}", "✓".green(), out.display());
            if !session.report().valid {
                eprintln!(
                    "{} {} ({} errors)",
                    "⚠️".yellow(),
                    session.report().status_line(),
                    session.report().errors.len()
                );
            }
        }
        None => println!("{}", session.preview()),
    }

    Ok(())
}
