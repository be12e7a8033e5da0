//! Match-day fluid and carbohydrate targets.
//!
//! Hydration (ml):
//!   daily baseline      = weight × 35 (female) / 40 (everyone else)
//!   2–4 h before match  = weight × 9 (heavy sweater) / 6
//!   30–60 min before    = weight × 4
//!
//! Carbohydrates (g):
//!   match target        = weight × {0.75 | 1.25 | 1.75} (see `match_carb_multiplier`)
//!   2–4 h before match  = weight × 2
//!   30–60 min before    = weight × 0.75
//!
//! Every figure is rounded to the nearest integer. Nothing here validates or fails:
//! weight is checked when the profile is written, and unparsable free text falls
//! back to the defaults below.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::athlete::AthleteProfileRow;

/// Used when the duration field carries no numeric token.
pub const DEFAULT_MATCH_MINUTES: f64 = 90.0;

/// Matches at or beyond this length use the long-match carbohydrate band.
const LONG_MATCH_MINUTES: f64 = 90.0;

static DURATION_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").ok());

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Selects the daily hydration baseline. Anything other than "female" uses the male rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(l) if l.eq_ignore_ascii_case("female") => Gender::Female,
            _ => Gender::Male,
        }
    }
}

/// Two-band view of level of play: advanced/elite vs everyone else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayTier {
    #[default]
    Recreational,
    Advanced,
}

impl PlayTier {
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("advanced") || label.eq_ignore_ascii_case("elite") {
            PlayTier::Advanced
        } else {
            PlayTier::Recreational
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NutritionInputs {
    pub weight_kg: f64,
    pub gender: Gender,
    pub heavy_sweater: bool,
    pub match_minutes: f64,
    pub tier: PlayTier,
}

impl NutritionInputs {
    /// Builds calculator inputs from raw profile fields and the free-text match duration.
    pub fn from_raw(
        weight_kg: f64,
        gender: Option<&str>,
        hydration_habits: &str,
        match_duration: &str,
        level_of_play: &str,
    ) -> Self {
        Self {
            weight_kg,
            gender: Gender::from_label(gender),
            heavy_sweater: is_heavy_sweater(hydration_habits),
            match_minutes: parse_duration_minutes(match_duration),
            tier: PlayTier::from_label(level_of_play),
        }
    }

    pub fn for_match(profile: &AthleteProfileRow, match_duration: &str) -> Self {
        Self::from_raw(
            profile.weight_kg,
            profile.gender.as_deref(),
            &profile.hydration_habits,
            match_duration,
            &profile.level_of_play,
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outputs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrationTargets {
    pub daily_baseline_ml: i64,
    pub pre_match_2to4h_ml: i64,
    pub pre_match_30to60min_ml: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarbTargets {
    pub match_target_g: i64,
    pub pre_match_2to4h_g: i64,
    pub pre_match_30to60min_g: i64,
}

/// Derived per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionCalcs {
    pub hydration: HydrationTargets,
    pub carbohydrates: CarbTargets,
}

// ────────────────────────────────────────────────────────────────────────────
// Calculation
// ────────────────────────────────────────────────────────────────────────────

pub fn calculate(inputs: &NutritionInputs) -> NutritionCalcs {
    NutritionCalcs {
        hydration: hydration_targets(inputs),
        carbohydrates: carb_targets(inputs),
    }
}

fn hydration_targets(inputs: &NutritionInputs) -> HydrationTargets {
    let w = inputs.weight_kg;
    let baseline_rate = match inputs.gender {
        Gender::Female => 35.0,
        Gender::Male => 40.0,
    };
    let pre_match_rate = if inputs.heavy_sweater { 9.0 } else { 6.0 };

    HydrationTargets {
        daily_baseline_ml: round(w * baseline_rate),
        pre_match_2to4h_ml: round(w * pre_match_rate),
        pre_match_30to60min_ml: round(w * 4.0),
    }
}

fn carb_targets(inputs: &NutritionInputs) -> CarbTargets {
    let w = inputs.weight_kg;
    CarbTargets {
        match_target_g: round(w * match_carb_multiplier(inputs.match_minutes, inputs.tier)),
        pre_match_2to4h_g: round(w * 2.0),
        pre_match_30to60min_g: round(w * 0.75),
    }
}

/// g/kg for the match itself: midpoints of the published ranges for each band.
fn match_carb_multiplier(match_minutes: f64, tier: PlayTier) -> f64 {
    let long_match = match_minutes >= LONG_MATCH_MINUTES;
    match (long_match, tier) {
        (false, PlayTier::Recreational) => 0.75,
        (false, PlayTier::Advanced) => 1.25,
        (true, PlayTier::Recreational) => 1.25,
        (true, PlayTier::Advanced) => 1.75,
    }
}

fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Case-insensitive check of the habits text for "heavy" or "sweat".
pub fn is_heavy_sweater(hydration_habits: &str) -> bool {
    let habits = hydration_habits.to_lowercase();
    habits.contains("heavy") || habits.contains("sweat")
}

/// Takes the first integer or decimal token in `duration` as minutes.
/// Units are not interpreted: "2 hours" yields 2.
pub fn parse_duration_minutes(duration: &str) -> f64 {
    DURATION_NUMBER
        .as_ref()
        .and_then(|re| re.find(duration))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(DEFAULT_MATCH_MINUTES)
}
