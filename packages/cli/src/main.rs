mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    edit, export, form, icons, init, validate, EditArgs, ExportArgs, FormArgs, InitArgs, ValidateArgs,
};
use config::Config;

/// Folio CLI - schema-validated editor for multi-locale profile documents
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a folio.config.json in the current directory
    Init(InitArgs),

    /// Validate the document against its schema
    Validate(ValidateArgs),

    /// Print or write the canonical serialization
    Export(ExportArgs),

    /// Render the editing form as text
    Form(FormArgs),

    /// List the icon reference tables
    Icons,

    /// Run an editing session from stdin or a script
    Edit(EditArgs),
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Cannot get current directory")?;

    let config = || Config::load(&cwd);

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Validate(args) => validate(args, &config()?, &cwd).await,
        Command::Export(args) => export(args, &config()?, &cwd).await,
        Command::Form(args) => form(args, &config()?, &cwd).await,
        Command::Icons => icons(),
        Command::Edit(args) => edit(args, &config()?, &cwd).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
