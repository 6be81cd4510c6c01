//! `folio edit`: a line-oriented editing session.
//!
//! Each input line is one command. Paths are JSON-Pointer-like: a leading `/`
//! makes them absolute, otherwise they are relative to the active locale
//! (`identity/name` edits `/languages/<active>/identity/name`).
//!
//! ```text
//! set <path> <value...>         clear <path>
//! add <path>                    remove <path> <index>
//! dup <path> <index>            toggle <path>
//! section add <type>            section remove <index>
//! section dup <index>           section move <from> <to>
//! locale select <code>          locale duplicate <new-code> [source]
//! locale delete [code]          default <code>
//! show [panel]  status  preview  save [file]  quit
//! ```
//!
//! A rejected command prints its error and the session continues.

use super::ResourceArgs;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::{Document, Edit, EditSession, PanelId};
use folio_path::{Path as DocPath, PathError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub resources: ResourceArgs,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Destination for `save` without a file (defaults to config exportPath)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub async fn edit(args: EditArgs, config: &Config, cwd: &Path) -> Result<()> {
    let mut session = args.resources.open(config, cwd).await?;
    let save_path = match &args.out {
        Some(out) => cwd.join(out),
        None => config.export_path(cwd),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.script {
        Some(script) => {
            let file = File::open(cwd.join(script))
                .with_context(|| format!("Failed to open script {}", script.display()))?;
            run_lines(&mut session, BufReader::new(file), &mut out, &save_path, false)
        }
        None => {
            let interactive = io::stdin().is_terminal();
            if interactive {
                writeln!(out, "{}", session.report().status_line())?;
            }
            run_lines(&mut session, io::stdin().lock(), &mut out, &save_path, interactive)
        }
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Apply(Edit),
    Show(Option<PanelId>),
    Status,
    Preview,
    Save(Option<PathBuf>),
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command {0:?} (try: set, clear, add, remove, dup, toggle, section, locale, default, show, status, preview, save, quit)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0:?} is not an index")]
    InvalidIndex(String),

    #[error("Unknown panel {0:?}")]
    UnknownPanel(String),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Execute commands until input ends or `quit`.
pub fn run_lines(
    session: &mut EditSession,
    input: impl BufRead,
    out: &mut impl Write,
    save_path: &Path,
    interactive: bool,
) -> Result<()> {
    let mut lines = input.lines();

    loop {
        if interactive {
            write!(out, "{} ", ">".bright_blue())?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match parse_command(&line, session.document()) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{} {}", "✗".red(), e)?;
                continue;
            }
        };

        match command {
            Command::Apply(edit) => match session.apply(edit) {
                Ok(outcome) => {
                    let status = if outcome.valid {
                        "valid".green()
                    } else {
                        format!("{} errors", outcome.error_count).yellow()
                    };
                    writeln!(out, "{} v{} ({})", "✓".green(), outcome.version, status)?;
                }
                Err(e) => writeln!(out, "{} {}", "✗".red(), e)?,
            },
            Command::Show(Some(id)) => {
                if let Some(panel) = session.panel(id) {
                    write!(out, "{}", panel)?;
                }
            }
            Command::Show(None) => {
                for panel in session.panels().filter(|panel| panel.id.is_locale_scoped()) {
                    write!(out, "{}", panel)?;
                }
            }
            Command::Status => write!(out, "{}", session.report())?,
            Command::Preview => writeln!(out, "{}", session.preview())?,
            Command::Save(file) => {
                let destination = file.unwrap_or_else(|| save_path.to_path_buf());
                match session.export(&destination) {
                    Ok(()) => writeln!(out, "{} Saved {}", "✓".green(), destination.display())?,
                    Err(e) => writeln!(out, "{} {}", "✗".red(), e)?,
                }
            }
            Command::Quit => break,
        }
    }

    Ok(())
}

/// Parse one line against the current document.
///
/// Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str, doc: &Document) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = split_word(line);
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb {
        "set" => {
            let (path, value) = split_word(rest);
            if path.is_empty() {
                return Err(CommandError::Usage("set <path> <value...>"));
            }
            Command::Apply(Edit::Input {
                path: resolve(doc, path)?,
                value: value.to_string(),
            })
        }
        "clear" => match args[..] {
            [path] => Command::Apply(Edit::Input {
                path: resolve(doc, path)?,
                value: String::new(),
            }),
            _ => return Err(CommandError::Usage("clear <path>")),
        },
        "add" => match args[..] {
            [path] => Command::Apply(Edit::AddItem { path: resolve(doc, path)? }),
            _ => return Err(CommandError::Usage("add <path>")),
        },
        "remove" => match args[..] {
            [path, index] => Command::Apply(Edit::RemoveItem {
                path: resolve(doc, path)?,
                index: parse_index(index)?,
            }),
            _ => return Err(CommandError::Usage("remove <path> <index>")),
        },
        "dup" => match args[..] {
            [path, index] => Command::Apply(Edit::DuplicateItem {
                path: resolve(doc, path)?,
                index: parse_index(index)?,
            }),
            _ => return Err(CommandError::Usage("dup <path> <index>")),
        },
        "toggle" => match args[..] {
            [path] => Command::Apply(Edit::Toggle { path: resolve(doc, path)? }),
            _ => return Err(CommandError::Usage("toggle <path>")),
        },
        "section" => Command::Apply(parse_section(&args)?),
        "locale" => Command::Apply(parse_locale(&args, doc)?),
        "default" => match args[..] {
            [code] => Command::Apply(Edit::Input {
                path: DocPath::root().key("defaultLanguage"),
                value: code.to_string(),
            }),
            _ => return Err(CommandError::Usage("default <code>")),
        },
        "show" => match args[..] {
            [] => Command::Show(None),
            [panel] => Command::Show(Some(parse_panel(panel)?)),
            _ => return Err(CommandError::Usage("show [panel]")),
        },
        "status" => Command::Status,
        "preview" => Command::Preview,
        "save" => match args[..] {
            [] => Command::Save(None),
            [file] => Command::Save(Some(PathBuf::from(file))),
            _ => return Err(CommandError::Usage("save [file]")),
        },
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_section(args: &[&str]) -> Result<Edit, CommandError> {
    let edit = match args {
        ["add", kind] => Edit::AddSection { kind: kind.to_string() },
        ["remove", index] => Edit::RemoveSection { index: parse_index(index)? },
        ["dup", index] => Edit::DuplicateSection { index: parse_index(index)? },
        ["move", from, to] => Edit::MoveSection {
            from: parse_index(from)?,
            to: parse_index(to)?,
        },
        _ => {
            return Err(CommandError::Usage(
                "section add <type> | remove <index> | dup <index> | move <from> <to>",
            ))
        }
    };
    Ok(edit)
}

fn parse_locale(args: &[&str], doc: &Document) -> Result<Edit, CommandError> {
    let active = doc.active_locale().to_string();
    let edit = match args {
        ["select", code] => Edit::SelectLocale { code: code.to_string() },
        ["duplicate", code] => Edit::DuplicateLocale { source: active, code: code.to_string() },
        ["duplicate", code, source] => Edit::DuplicateLocale {
            source: source.to_string(),
            code: code.to_string(),
        },
        ["delete"] => Edit::DeleteLocale { code: active },
        ["delete", code] => Edit::DeleteLocale { code: code.to_string() },
        _ => {
            return Err(CommandError::Usage(
                "locale select <code> | duplicate <new-code> [source] | delete [code]",
            ))
        }
    };
    Ok(edit)
}

fn parse_panel(name: &str) -> Result<PanelId, CommandError> {
    let id = match name {
        "languages" => PanelId::LocaleSelector,
        "default" => PanelId::DefaultLanguage,
        "language" => PanelId::Language,
        "identity" => PanelId::Identity,
        "contact" => PanelId::Contact,
        "sections" => PanelId::Sections,
        "icons" => PanelId::IconReference,
        other => return Err(CommandError::UnknownPanel(other.to_string())),
    };
    Ok(id)
}

/// Absolute pointer, or a path relative to the active locale.
fn resolve(doc: &Document, raw: &str) -> Result<DocPath, CommandError> {
    let path = if raw.starts_with('/') {
        DocPath::parse_pointer(raw)?
    } else {
        doc.scoped(&DocPath::parse_pointer(&format!("/{raw}"))?)
    };
    Ok(path.resolved_in(doc.root()))
}

fn parse_index(raw: &str) -> Result<usize, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidIndex(raw.to_string()))
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}
