//! Routine section parser: splits generated routine text into titled display sections.
//!
//! The model is asked for labeled sections but formatting drifts: markdown emphasis,
//! numbered or bare headers, trailing colons or none. Two header vocabularies are
//! recognised at once because routines generated with the older prompt are still
//! stored and displayed.
//!
//! Algorithm:
//! 1. Strip `*` and `#` glyphs from the whole text.
//! 2. For each rule in `HEADER_RULES` (declaration order), find its first match that
//!    does not overlap a header already found.
//! 3. Keep one rule per concept (`concept_key`); earlier entries win.
//! 4. Order the surviving headers by position in the text.
//! 5. Each section body runs from the end of its header to the start of the next one.
//! 6. Bodies lose list markers and blank lines; empty sections are dropped.
//!
//! Never fails. Zero recognised headers yields an empty list and the caller
//! shows the raw text instead (see `routine::display`).

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// Canonical display titles. Section titles never come from the raw header text.
pub const BREATHING_ROUTINE: &str = "Breathing Routine";
pub const VISUALIZATION_ROUTINE: &str = "Visualization Routine";
pub const PERSONALIZED_MANTRA: &str = "Personalized Mantra";
pub const STRATEGY_REMINDERS: &str = "Strategy Reminders";
pub const HYDRATION_ENERGY_CUE: &str = "Hydration & Energy Cue";
pub const MOTIVATIONAL_CLOSING: &str = "Motivational Closing";

pub const BREATHING_GROUNDING: &str = "Breathing & Grounding";
pub const VISUALIZATION: &str = "Visualization";
pub const AFFIRMATIONS: &str = "Affirmations";
pub const TACTICAL_FOCUS: &str = "Tactical Focus";
pub const PHYSICAL_PREPARATION: &str = "Physical Preparation";
pub const CLOSING: &str = "Closing";

/// Category tag the client maps to an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionIcon {
    Breathing,
    Visualization,
    Mantra,
    Strategy,
    Hydration,
    Closing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutineSection {
    pub title: &'static str,
    pub content: String,
    pub icon: SectionIcon,
}

/// (header phrase regex, canonical title, icon). Earlier entries win on concept clashes.
/// Newer numbered vocabulary first, then the legacy one.
const HEADER_RULES: &[(&str, &str, SectionIcon)] = &[
    (r"breathing\s+routine", BREATHING_ROUTINE, SectionIcon::Breathing),
    (r"visuali[sz]ation\s+routine", VISUALIZATION_ROUTINE, SectionIcon::Visualization),
    (r"personali[sz]ed\s+mantra", PERSONALIZED_MANTRA, SectionIcon::Mantra),
    (r"strategy\s+reminders", STRATEGY_REMINDERS, SectionIcon::Strategy),
    (r"hydration\s+(?:and|&)\s+energy\s+cue", HYDRATION_ENERGY_CUE, SectionIcon::Hydration),
    (r"motivational\s+closing", MOTIVATIONAL_CLOSING, SectionIcon::Closing),
    (r"breathing\s+(?:and|&)\s+grounding", BREATHING_GROUNDING, SectionIcon::Breathing),
    (r"visuali[sz]ation", VISUALIZATION, SectionIcon::Visualization),
    (r"affirmations", AFFIRMATIONS, SectionIcon::Mantra),
    (r"tactical\s+focus", TACTICAL_FOCUS, SectionIcon::Strategy),
    (r"physical\s+preparation", PHYSICAL_PREPARATION, SectionIcon::Hydration),
    (r"closing", CLOSING, SectionIcon::Closing),
];

struct HeaderRule {
    pattern: Regex,
    title: &'static str,
    icon: SectionIcon,
}

/// Optional leading ordinal such as `3.`, `3)` or `3 `.
const ORDINAL: &str = r"(?:\d+[.)]?[ \t]*)?";
/// Qualifier allowed between a colon-terminated header and its colon:
/// `(60 seconds)` or a short dash clause.
const COLON_QUALIFIER: &str = r"(?:[ \t]*\([^)\r\n]*\)|[ \t]+[-–][^:\r\n]{1,40})?";
/// Qualifier allowed after a bare header that fills its own line.
const LINE_QUALIFIER: &str = r"(?:[ \t]*\([^)\r\n]*\))?(?:[ \t]+[-–][^:\r\n]*)?";

/// Two header forms are recognised:
/// - `PHRASE:` (optionally qualified) anywhere in the text, so stored routines
///   that run legacy headers inline keep parsing;
/// - a bare `PHRASE` alone on its line, so body sentences that merely start with
///   a header word are not mistaken for headers.
static RULES: LazyLock<Vec<HeaderRule>> = LazyLock::new(|| {
    HEADER_RULES
        .iter()
        .filter_map(|&(phrase, title, icon)| {
            let pattern = format!(
                r"(?im)^[ \t]*{ORDINAL}{phrase}{LINE_QUALIFIER}[ \t]*\r?$|{ORDINAL}\b{phrase}{COLON_QUALIFIER}[ \t]*:"
            );
            Regex::new(&pattern)
                .ok()
                .map(|pattern| HeaderRule { pattern, title, icon })
        })
        .collect()
});

struct HeaderHit {
    title: &'static str,
    icon: SectionIcon,
    start: usize,
    end: usize,
}

/// Splits routine text into ordered sections. Returns an empty list when no header is found.
pub fn parse_sections(text: &str) -> Vec<RoutineSection> {
    let normalized = strip_markdown(text);

    let mut concepts_seen = HashSet::new();
    let mut hits: Vec<HeaderHit> = Vec::new();
    for rule in RULES.iter() {
        // A match lying inside an earlier rule's header ("closing" within
        // "motivational closing") is part of that header, not a new one.
        let Some(m) = rule
            .pattern
            .find_iter(&normalized)
            .find(|m| !hits.iter().any(|h| m.start() < h.end && h.start < m.end()))
        else {
            continue;
        };
        if !concepts_seen.insert(concept_key(rule.title)) {
            continue;
        }
        hits.push(HeaderHit {
            title: rule.title,
            icon: rule.icon,
            start: m.start(),
            end: m.end(),
        });
    }

    hits.sort_by_key(|h| h.start);

    hits.iter()
        .enumerate()
        .filter_map(|(i, hit)| {
            let body_end = hits.get(i + 1).map_or(normalized.len(), |next| next.start);
            let body = normalized.get(hit.end..body_end).unwrap_or_default();
            let content = clean_body(body);
            (!content.is_empty()).then(|| RoutineSection {
                title: hit.title,
                content,
                icon: hit.icon,
            })
        })
        .collect()
}

/// Removes markdown emphasis and heading glyphs (`**`, `##`, `*`, `#`).
pub fn strip_markdown(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '*' | '#')).collect()
}

/// Dedup key: the lowercased title without a trailing "Routine"/"Reminders" word.
/// "Visualization Routine" and "Visualization" collide; "Strategy Reminders" and
/// "Tactical Focus" do not.
fn concept_key(title: &str) -> String {
    let lower = title.to_lowercase();
    for suffix in [" routine", " reminders"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            return stem.to_string();
        }
    }
    lower
}

fn clean_body(body: &str) -> String {
    body.lines()
        .map(|line| line.trim().trim_start_matches(['-', '•']).trim_start())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(sections: &[RoutineSection]) -> Vec<&'static str> {
        sections.iter().map(|s| s.title).collect()
    }

    #[test]
    fn test_numbered_sections_in_order() {
        let text = "1. BREATHING ROUTINE:\nBreathe deeply.\n2. PERSONALIZED MANTRA:\nStay calm\n3. STRATEGY REMINDERS:\n- Stay low\n- Watch serve";
        let sections = parse_sections(text);

        assert_eq!(
            sections,
            vec![
                RoutineSection {
                    title: BREATHING_ROUTINE,
                    content: "Breathe deeply.".to_string(),
                    icon: SectionIcon::Breathing,
                },
                RoutineSection {
                    title: PERSONALIZED_MANTRA,
                    content: "Stay calm".to_string(),
                    icon: SectionIcon::Mantra,
                },
                RoutineSection {
                    title: STRATEGY_REMINDERS,
                    content: "Stay low\nWatch serve".to_string(),
                    icon: SectionIcon::Strategy,
                },
            ]
        );
    }

    #[test]
    fn test_legacy_vocabulary() {
        let text = "VISUALIZATION:\nSee yourself winning.\nCLOSING:\nYou are ready.";
        let sections = parse_sections(text);
        assert_eq!(titles(&sections), vec![VISUALIZATION, CLOSING]);
        assert_eq!(sections[0].content, "See yourself winning.");
        assert_eq!(sections[1].content, "You are ready.");
    }

    #[test]
    fn test_no_recognised_headers_yields_empty() {
        let text = "Take a breath. You have trained for this.\nGo out and compete.";
        assert!(parse_sections(text).is_empty());
        assert!(parse_sections("").is_empty());
    }

    #[test]
    fn test_full_newer_template_with_markdown() {
        let text = "\
## 1. **Breathing Routine**
Inhale for four counts.
Exhale for six.

## 2. **Visualization Routine**
* Picture the first point.
* Feel the racket in your hand.

## 3. **Personalized Mantra**
Calm mind, quick feet.

## 4. **Strategy Reminders**
- Attack the backhand
- Stay patient in long rallies

## 5. **Hydration and Energy Cue**
Sip 300 ml now.

## 6. **Motivational Closing**
You belong here.
Go play.";
        let sections = parse_sections(text);
        assert_eq!(
            titles(&sections),
            vec![
                BREATHING_ROUTINE,
                VISUALIZATION_ROUTINE,
                PERSONALIZED_MANTRA,
                STRATEGY_REMINDERS,
                HYDRATION_ENERGY_CUE,
                MOTIVATIONAL_CLOSING,
            ]
        );
        assert_eq!(
            sections[1].content,
            "Picture the first point.\nFeel the racket in your hand."
        );
        assert_eq!(sections[5].content, "You belong here.\nGo play.");
    }

    #[test]
    fn test_sections_follow_text_order_not_rule_order() {
        let text = "CLOSING:\nFinish strong.\nBREATHING ROUTINE:\nBox breathing.";
        let sections = parse_sections(text);
        assert_eq!(titles(&sections), vec![CLOSING, BREATHING_ROUTINE]);
    }

    #[test]
    fn test_header_without_colon_and_inline_content() {
        let text = "Personalized Mantra: I am ready\nTactical Focus\nServe wide";
        let sections = parse_sections(text);
        assert_eq!(titles(&sections), vec![PERSONALIZED_MANTRA, TACTICAL_FOCUS]);
        assert_eq!(sections[0].content, "I am ready");
        assert_eq!(sections[1].content, "Serve wide");
    }

    #[test]
    fn test_body_sentence_starting_with_header_word_is_not_a_header() {
        let text = "VISUALIZATION:\nVisualization is a skill you have practised.\nCLOSING:\nDone.";
        let sections = parse_sections(text);
        assert_eq!(titles(&sections), vec![VISUALIZATION, CLOSING]);
        assert_eq!(
            sections[0].content,
            "Visualization is a skill you have practised."
        );
    }

    #[test]
    fn test_closing_rule_does_not_fire_inside_motivational_closing() {
        let text = "6. MOTIVATIONAL CLOSING:\nYou are ready.";
        let sections = parse_sections(text);
        assert_eq!(titles(&sections), vec![MOTIVATIONAL_CLOSING]);
    }

    #[test]
    fn test_inline_legacy_headers() {
        let text = "Let's begin. BREATHING AND GROUNDING: Breathe. VISUALIZATION: See it. CLOSING: Go.";
        let sections = parse_sections(text);
        assert_eq!(titles(&sections), vec![BREATHING_GROUNDING, VISUALIZATION, CLOSING]);
        assert_eq!(sections[0].content, "Breathe.");
        assert_eq!(sections[1].content, "See it.");
        assert_eq!(sections[2].content, "Go.");
    }

    #[test]
    fn test_headers_with_parenthesised_qualifier() {
        let text = "1. BREATHING ROUTINE (60 seconds):\nBreathe in.\n3. PERSONALIZED MANTRA (repeat 3x):\nSteady.";
        let sections = parse_sections(text);
        assert_eq!(titles(&sections), vec![BREATHING_ROUTINE, PERSONALIZED_MANTRA]);
        assert_eq!(sections[0].content, "Breathe in.");
        assert_eq!(sections[1].content, "Steady.");
    }

    #[test]
    fn test_headers_with_dash_qualifier() {
        let text = "Breathing Routine - 1 minute\nInhale slowly.\nSTRATEGY REMINDERS - vs a lefty: Serve wide.\nMotivational Closing - final words\nYou are ready.";
        let sections = parse_sections(text);
        assert_eq!(
            titles(&sections),
            vec![BREATHING_ROUTINE, STRATEGY_REMINDERS, MOTIVATIONAL_CLOSING]
        );
        assert_eq!(sections[0].content, "Inhale slowly.");
        assert_eq!(sections[1].content, "Serve wide.");
        assert_eq!(sections[2].content, "You are ready.");
    }

    #[test]
    fn test_inline_closing_inside_motivational_closing_is_ignored() {
        let text = "Breathe. MOTIVATIONAL CLOSING: Go get it. Later, CLOSING: one more line.";
        let sections = parse_sections(text);
        assert_eq!(titles(&sections), vec![MOTIVATIONAL_CLOSING, CLOSING]);
        assert_eq!(sections[0].content, "Go get it. Later,");
        assert_eq!(sections[1].content, "one more line.");
    }

    #[test]
    fn test_header_word_inside_longer_word_is_not_a_header() {
        let text = "Foreclosing: not a header.";
        assert!(parse_sections(text).is_empty());
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        let text = "BREATHING ROUTINE:\n\n- \nPERSONALIZED MANTRA:\nSteady.";
        let sections = parse_sections(text);
        assert_eq!(titles(&sections), vec![PERSONALIZED_MANTRA]);
    }

    #[test]
    fn test_strategy_and_tactical_focus_are_distinct_concepts() {
        let text = "STRATEGY REMINDERS:\nGo wide.\nTACTICAL FOCUS:\nWatch the toss.";
        let sections = parse_sections(text);
        assert_eq!(titles(&sections), vec![STRATEGY_REMINDERS, TACTICAL_FOCUS]);
    }

    #[test]
    fn test_bullet_glyph_markers_are_stripped() {
        let text = "AFFIRMATIONS:\n• I am strong\n  - I am fast";
        let sections = parse_sections(text);
        assert_eq!(sections[0].content, "I am strong\nI am fast");
    }

    #[test]
    fn test_parse_is_stable_under_renormalisation() {
        let text = "**1. BREATHING ROUTINE:**\nBreathe.\n## CLOSING\n*You are ready.*";
        let once = parse_sections(text);
        let twice = parse_sections(&strip_markdown(&strip_markdown(text)));
        assert_eq!(once, twice);
        assert_eq!(titles(&once), vec![BREATHING_ROUTINE, CLOSING]);
    }

    #[test]
    fn test_concept_key_strips_suffix_words() {
        assert_eq!(concept_key(VISUALIZATION_ROUTINE), concept_key(VISUALIZATION));
        assert_eq!(concept_key(STRATEGY_REMINDERS), "strategy");
        assert_ne!(concept_key(STRATEGY_REMINDERS), concept_key(TACTICAL_FOCUS));
        assert_ne!(concept_key(MOTIVATIONAL_CLOSING), concept_key(CLOSING));
    }

    /// Characterization: when both vocabularies label the same concept, the
    /// earlier-declared rule wins even if the other header comes first in the text.
    /// The losing header stays behind as body text of the preceding section.
    #[test]
    fn test_characterization_declared_rule_wins_over_text_position() {
        let text = "BREATHING ROUTINE:\nBreathe.\nVISUALIZATION:\nOld style imagery.\nVISUALIZATION ROUTINE:\nNew style imagery.";
        let sections = parse_sections(text);

        assert_eq!(titles(&sections), vec![BREATHING_ROUTINE, VISUALIZATION_ROUTINE]);
        assert_eq!(
            sections[0].content,
            "Breathe.\nVISUALIZATION:\nOld style imagery."
        );
        assert_eq!(sections[1].content, "New style imagery.");
    }

    /// Characterization: only the first occurrence of a header is used. A repeated
    /// header is swallowed into the body of the section that contains it.
    #[test]
    fn test_characterization_repeated_header_is_body_text() {
        let text = "CLOSING:\nOne.\nCLOSING:\nTwo.";
        let sections = parse_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "One.\nCLOSING:\nTwo.");
    }
}
