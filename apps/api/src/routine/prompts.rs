// All LLM prompt constants for the Routine module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{SCOPE_INSTRUCTION, SPOKEN_STYLE_INSTRUCTION};
use crate::models::athlete::AthleteProfileRow;
use crate::nutrition::NutritionCalcs;
use crate::routine::sections::{
    BREATHING_ROUTINE, HYDRATION_ENERGY_CUE, MOTIVATIONAL_CLOSING, PERSONALIZED_MANTRA,
    STRATEGY_REMINDERS, VISUALIZATION_ROUTINE,
};
use crate::routine::MatchContext;

/// Literal line separating the routine from the guided meditation script.
pub const MEDITATION_MARKER: &str = "---MEDITATION SCRIPT---";

/// Section labels the model is asked to emit, in order.
/// They match the parser's newer vocabulary so replies split cleanly for display.
pub const SECTION_LABELS: [&str; 6] = [
    BREATHING_ROUTINE,
    VISUALIZATION_ROUTINE,
    PERSONALIZED_MANTRA,
    STRATEGY_REMINDERS,
    HYDRATION_ENERGY_CUE,
    MOTIVATIONAL_CLOSING,
];

pub const ROUTINE_SYSTEM: &str = "You are an expert sports psychologist who writes short, \
    personalized pre-match mental preparation routines for competitive athletes. \
    You follow the requested section structure exactly.";

/// Builds the user prompt for one generation request.
pub fn build_routine_prompt(
    profile: &AthleteProfileRow,
    ctx: &MatchContext,
    calcs: &NutritionCalcs,
) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str("Create a personalized pre-match mental preparation routine for this athlete.\n\n");

    prompt.push_str("Athlete Profile:\n");
    prompt.push_str(&format!("- Name: {}\n", profile.name));
    match profile.position.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(position) => prompt.push_str(&format!("- Sport: {}, Position: {}\n", profile.sport, position)),
        None => prompt.push_str(&format!("- Sport: {}\n", profile.sport)),
    }
    prompt.push_str(&format!("- Level of Play: {}\n", profile.level_of_play));
    if let Some(age) = profile.age {
        prompt.push_str(&format!("- Age: {age}\n"));
    }
    prompt.push_str(&format!(
        "- Physical: {}cm, {}kg\n",
        profile.height_cm, profile.weight_kg
    ));
    prompt.push_str(&format!("- Performs Best When: {}\n", profile.performs_best_when));
    prompt.push_str(&format!("- Mental Tendencies: {}\n", profile.mental_tendencies));
    prompt.push_str(&format!("- Preferred Match Time: {}\n\n", profile.preferred_match_time));

    prompt.push_str("Match Context:\n");
    prompt.push_str(&format!("- Opponent: {}\n", ctx.opponent_name));
    prompt.push_str(&format!("- Opponent Style: {}\n", ctx.opponent_style));
    if let Some(history) = ctx.match_history.as_deref().filter(|h| !h.trim().is_empty()) {
        prompt.push_str(&format!("- Match History: {history}\n"));
    }
    prompt.push_str(&format!("- Current Mood: {}\n", ctx.mood));
    prompt.push_str(&format!("- Energy Level: {}/10\n", ctx.energy_level));
    prompt.push_str(&format!("- Hydration So Far Today: {}ml\n", ctx.hydration_today_ml));
    prompt.push_str(&format!("- Match Duration: {}\n\n", ctx.match_duration));

    let plan = &ctx.strategy_template;
    prompt.push_str("Strategic Plan:\n");
    prompt.push_str(&format!("- Primary Plan: {}\n", plan.primary_plan));
    prompt.push_str(&format!("- Opponent Tendencies: {}\n", plan.opponent_tendencies));
    prompt.push_str(&format!("- Situations to Avoid: {}\n", plan.situations_to_avoid));
    prompt.push_str(&format!("- Strengths to Emphasize: {}\n", plan.strengths_to_emphasize));
    if let Some(reminders) = plan.coach_reminders.as_deref().filter(|r| !r.trim().is_empty()) {
        prompt.push_str(&format!("- Coach Reminders: {reminders}\n"));
    }
    prompt.push('\n');

    let h = &calcs.hydration;
    let c = &calcs.carbohydrates;
    prompt.push_str("Nutrition Targets:\n");
    prompt.push_str(&format!(
        "- Fluids: {}ml daily baseline, {}ml 2-4 hours before, {}ml 30-60 minutes before\n",
        h.daily_baseline_ml, h.pre_match_2to4h_ml, h.pre_match_30to60min_ml
    ));
    prompt.push_str(&format!(
        "- Carbohydrates: {}g 2-4 hours before, {}g 30-60 minutes before, {}g during the match\n\n",
        c.pre_match_2to4h_g, c.pre_match_30to60min_g, c.match_target_g
    ));

    prompt.push_str("Structure the routine with exactly these numbered section headers, each on its own line:\n");
    for (i, label) in SECTION_LABELS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}:\n", i + 1, label.to_uppercase()));
    }
    prompt.push_str(
        "\nKeep the Personalized Mantra to a single short sentence the athlete can repeat.\n\n",
    );

    prompt.push_str(&format!(
        "After the routine, write a line containing exactly {MEDITATION_MARKER} and then a \
         3-5 minute guided meditation script for audio playback that walks the athlete \
         through the same routine without section headers.\n\n"
    ));

    prompt.push_str(SPOKEN_STYLE_INSTRUCTION);
    prompt.push('\n');
    prompt.push_str(SCOPE_INSTRUCTION);

    prompt
}
