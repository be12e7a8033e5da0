//! Display projection of a stored routine: parsed sections plus the hero banner line.
//! Recomputed on every read; nothing here is persisted.

use serde::Serialize;

use crate::routine::sections::{
    parse_sections, RoutineSection, SectionIcon, CLOSING, MOTIVATIONAL_CLOSING, PERSONALIZED_MANTRA,
};

pub const DEFAULT_HERO_TEXT: &str = "You are ready.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySection {
    /// `None` only for the whole-text fallback card.
    pub title: Option<&'static str>,
    pub content: String,
    pub icon: Option<SectionIcon>,
}

impl From<RoutineSection> for DisplaySection {
    fn from(section: RoutineSection) -> Self {
        Self {
            title: Some(section.title),
            content: section.content,
            icon: Some(section.icon),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutineView {
    pub sections: Vec<DisplaySection>,
    pub hero_text: String,
    /// True when no header was recognised and the raw text is shown as one card.
    pub is_fallback: bool,
}

pub fn build_view(routine_text: &str) -> RoutineView {
    let parsed = parse_sections(routine_text);
    let hero_text = hero_text(&parsed);

    if parsed.is_empty() {
        let raw = routine_text.trim();
        let sections = if raw.is_empty() {
            Vec::new()
        } else {
            vec![DisplaySection {
                title: None,
                content: raw.to_string(),
                icon: None,
            }]
        };
        return RoutineView {
            sections,
            hero_text,
            is_fallback: true,
        };
    }

    RoutineView {
        sections: parsed.into_iter().map(DisplaySection::from).collect(),
        hero_text,
        is_fallback: false,
    }
}

/// Mantra content, else the first line of the closing section (newer title first),
/// else the default line.
pub fn hero_text(sections: &[RoutineSection]) -> String {
    let by_title = |title: &str| sections.iter().find(|s| s.title == title);

    if let Some(mantra) = by_title(PERSONALIZED_MANTRA) {
        return mantra.content.clone();
    }

    [MOTIVATIONAL_CLOSING, CLOSING]
        .into_iter()
        .filter_map(by_title)
        .find_map(|s| s.content.lines().next().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_HERO_TEXT.to_string())
}
