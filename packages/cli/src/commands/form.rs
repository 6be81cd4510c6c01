use super::ResourceArgs;
use crate::config::Config;
use anyhow::Result;
use clap::{Args, ValueEnum};
use folio_editor::{Edit, PanelId};
use std::path::Path;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PanelArg {
    Languages,
    Default,
    Language,
    Identity,
    Contact,
    Sections,
    Icons,
}

impl From<PanelArg> for PanelId {
    fn from(arg: PanelArg) -> Self {
        match arg {
            PanelArg::Languages => PanelId::LocaleSelector,
            PanelArg::Default => PanelId::DefaultLanguage,
            PanelArg::Language => PanelId::Language,
            PanelArg::Identity => PanelId::Identity,
            PanelArg::Contact => PanelId::Contact,
            PanelArg::Sections => PanelId::Sections,
            PanelArg::Icons => PanelId::IconReference,
        }
    }
}

#[derive(Debug, Args)]
pub struct FormArgs {
    #[command(flatten)]
    pub resources: ResourceArgs,

    /// Locale to render (defaults to the document's default language)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Render a single panel
    #[arg(short, long, value_enum)]
    pub panel: Option<PanelArg>,
}

pub async fn form(args: FormArgs, config: &Config, cwd: &Path) -> Result<()> {
    let mut session = args.resources.open(config, cwd).await?;

    if let Some(code) = args.locale {
        session.apply(Edit::SelectLocale { code })?;
    }

    match args.panel {
        Some(panel) => {
            if let Some(panel) = session.panel(panel.into()) {
                print!("{}", panel);
            }
        }
        None => {
            for panel in session.panels() {
                print!("{}", panel);
                println!();
            }
        }
    }

    println!("{}", session.report());
    Ok(())
}
