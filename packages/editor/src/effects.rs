//! # Render Effects
//!
//! An edit changes the document at one place but may change what several
//! panels show. Each [`RenderEffect`] looks at an edit and names the panels it
//! invalidates; the [`EffectEngine`] unions them.
//!
//! Effects are:
//! - **Deterministic**: the same edit always invalidates the same panels
//! - **Order-independent**: the result is a set
//! - **Conservative**: when in doubt a panel is re-rendered

use std::collections::BTreeSet;

use folio_path::Segment;

use crate::document::{DEFAULT_LANGUAGE_KEY, LANGUAGES_KEY};
use crate::form::PanelId;
use crate::session::Edit;

/// Maps an edit to the panels it invalidates.
pub trait RenderEffect: std::fmt::Debug {
    /// `owner` is the panel whose control the edit was resolved against.
    fn analyze(&self, edit: &Edit, owner: Option<PanelId>) -> Vec<PanelId>;
}

/// The panel holding the edited control always re-renders.
#[derive(Debug)]
pub struct OwnerPanel;

impl RenderEffect for OwnerPanel {
    fn analyze(&self, _edit: &Edit, owner: Option<PanelId>) -> Vec<PanelId> {
        owner.into_iter().collect()
    }
}

/// The selector and the default-language choice list show locale codes and
/// labels, so they follow any edit that can change either.
#[derive(Debug)]
pub struct LocaleListChanged;

impl RenderEffect for LocaleListChanged {
    fn analyze(&self, edit: &Edit, _owner: Option<PanelId>) -> Vec<PanelId> {
        let touches_list = match edit {
            Edit::DuplicateLocale { .. } | Edit::DeleteLocale { .. } => true,
            Edit::Input { path, .. } => {
                let segments = path.segments();
                match segments {
                    [Segment::Key(key)] => key == DEFAULT_LANGUAGE_KEY,
                    [Segment::Key(root), Segment::Key(_), Segment::Key(language), Segment::Key(label)] => {
                        root == LANGUAGES_KEY && language == "language" && label == "label"
                    }
                    _ => false,
                }
            }
            _ => false,
        };

        if touches_list {
            vec![PanelId::LocaleSelector, PanelId::DefaultLanguage]
        } else {
            Vec::new()
        }
    }
}

/// Switching, creating or removing a locale can change the active variant,
/// so every locale-scoped panel is rebuilt.
#[derive(Debug)]
pub struct ActiveLocaleChanged;

impl RenderEffect for ActiveLocaleChanged {
    fn analyze(&self, edit: &Edit, _owner: Option<PanelId>) -> Vec<PanelId> {
        match edit {
            Edit::SelectLocale { .. } | Edit::DuplicateLocale { .. } | Edit::DeleteLocale { .. } => {
                let mut panels = vec![PanelId::LocaleSelector];
                panels.extend(PanelId::LOCALE_SCOPED);
                panels
            }
            _ => Vec::new(),
        }
    }
}

/// Section list operations shift indices, so the whole list re-renders.
#[derive(Debug)]
pub struct SectionsChanged;

impl RenderEffect for SectionsChanged {
    fn analyze(&self, edit: &Edit, _owner: Option<PanelId>) -> Vec<PanelId> {
        match edit {
            Edit::AddSection { .. }
            | Edit::RemoveSection { .. }
            | Edit::DuplicateSection { .. }
            | Edit::MoveSection { .. } => vec![PanelId::Sections],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct EffectEngine {
    effects: Vec<Box<dyn RenderEffect>>,
}

impl EffectEngine {
    /// Create engine with default effects
    pub fn new() -> Self {
        Self {
            effects: vec![
                Box::new(OwnerPanel),
                Box::new(LocaleListChanged),
                Box::new(ActiveLocaleChanged),
                Box::new(SectionsChanged),
            ],
        }
    }

    pub fn affected_panels(&self, edit: &Edit, owner: Option<PanelId>) -> BTreeSet<PanelId> {
        self.effects
            .iter()
            .flat_map(|effect| effect.analyze(edit, owner))
            .collect()
    }
}

impl Default for EffectEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_path::path;

    #[test]
    fn test_input_affects_owner_only() {
        let engine = EffectEngine::new();
        let edit = Edit::Input {
            path: path!["languages", "en", "identity", "name"],
            value: "Ada".to_string(),
        };
        let panels = engine.affected_panels(&edit, Some(PanelId::Identity));
        assert_eq!(panels.into_iter().collect::<Vec<_>>(), vec![PanelId::Identity]);
    }

    #[test]
    fn test_label_input_refreshes_locale_list() {
        let engine = EffectEngine::new();
        let edit = Edit::Input {
            path: path!["languages", "en", "language", "label"],
            value: "English".to_string(),
        };
        let panels = engine.affected_panels(&edit, Some(PanelId::Language));
        assert!(panels.contains(&PanelId::Language));
        assert!(panels.contains(&PanelId::LocaleSelector));
        assert!(panels.contains(&PanelId::DefaultLanguage));
    }

    #[test]
    fn test_locale_switch_rebuilds_scoped_panels() {
        let engine = EffectEngine::new();
        let edit = Edit::SelectLocale { code: "fr".to_string() };
        let panels = engine.affected_panels(&edit, None);
        for id in PanelId::LOCALE_SCOPED {
            assert!(panels.contains(&id));
        }
        assert!(!panels.contains(&PanelId::IconReference));
    }

    #[test]
    fn test_section_ops_touch_sections_only() {
        let engine = EffectEngine::new();
        let panels = engine.affected_panels(&Edit::MoveSection { from: 0, to: 1 }, None);
        assert_eq!(panels.into_iter().collect::<Vec<_>>(), vec![PanelId::Sections]);
    }
}
