use anyhow::Result;
use colored::Colorize;
use folio_editor::{icon_reference, IconCategory};

pub fn icons() -> Result<()> {
    let entries = icon_reference();

    for (category, title) in [(IconCategory::Social, "Social"), (IconCategory::Tech, "Tech")] {
        println!("{}", title.bold());
        for entry in entries.iter().filter(|entry| entry.category == category) {
            println!("   {} {}", format!("{:<12}", entry.slug).bright_white(), entry.path);
        }
        println!();
    }

    Ok(())
}
