//! Static icon lookup tables.
//!
//! Social slugs feed the contact link `icon` choice list; both tables are
//! listed in the icon reference panel.

use serde::Serialize;

use crate::binder::Choice;

pub const SOCIAL_ICONS: &[(&str, &str)] = &[
    ("github", "assets/icons/github.svg"),
    ("linkedin", "assets/icons/linkedin.svg"),
    ("x", "assets/icons/x.svg"),
    ("email", "assets/icons/email.svg"),
    ("website", "assets/icons/website.svg"),
];

pub const TECH_ICONS: &[(&str, &str)] = &[
    ("python", "assets/icons/python.svg"),
    ("databricks", "assets/icons/databricks.svg"),
    ("typescript", "assets/icons/typescript.svg"),
    ("react", "assets/icons/react.svg"),
    ("next-js", "assets/icons/next-js.svg"),
    ("node-js", "assets/icons/node-js.svg"),
    ("graphql", "assets/icons/graphql.svg"),
    ("postgresql", "assets/icons/postgresql.svg"),
    ("terraform", "assets/icons/terraform.svg"),
    ("supabase", "assets/icons/supabase.svg"),
    ("mongodb", "assets/icons/mongodb.svg"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IconCategory {
    Social,
    Tech,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconEntry {
    pub slug: &'static str,
    pub path: &'static str,
    pub category: IconCategory,
}

pub fn social_icon_path(slug: &str) -> Option<&'static str> {
    lookup(SOCIAL_ICONS, slug)
}

pub fn tech_icon_path(slug: &str) -> Option<&'static str> {
    lookup(TECH_ICONS, slug)
}

fn lookup(table: &'static [(&'static str, &'static str)], slug: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == slug)
        .map(|(_, path)| *path)
}

/// Social entries followed by tech entries.
pub fn icon_reference() -> Vec<IconEntry> {
    let social = SOCIAL_ICONS.iter().map(|&(slug, path)| IconEntry {
        slug,
        path,
        category: IconCategory::Social,
    });
    let tech = TECH_ICONS.iter().map(|&(slug, path)| IconEntry {
        slug,
        path,
        category: IconCategory::Tech,
    });
    social.chain(tech).collect()
}

/// Choices for a contact link icon: "no icon" plus every social slug.
pub fn link_icon_choices() -> Vec<Choice> {
    std::iter::once(Choice::new("", "No icon"))
        .chain(SOCIAL_ICONS.iter().map(|(slug, _)| Choice::new(*slug, *slug)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(tech_icon_path("react"), Some("assets/icons/react.svg"));
        assert_eq!(social_icon_path("github"), Some("assets/icons/github.svg"));
        assert_eq!(tech_icon_path("cobol"), None);
    }

    #[test]
    fn test_reference_lists_social_first() {
        let entries = icon_reference();
        assert_eq!(entries.len(), SOCIAL_ICONS.len() + TECH_ICONS.len());
        assert_eq!(entries[0].category, IconCategory::Social);
        assert_eq!(entries.last().unwrap().category, IconCategory::Tech);
    }

    #[test]
    fn test_link_choices_start_with_no_icon() {
        let choices = link_icon_choices();
        assert_eq!(choices[0].value, "");
        assert_eq!(choices.len(), SOCIAL_ICONS.len() + 1);
    }
}
