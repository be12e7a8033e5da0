//! Pre-match routine generation, storage, and display.

pub mod display;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod script;
pub mod sections;
pub mod store;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::routine::StrategyTemplate;

/// Match-day inputs. Not persisted on its own; snapshotted into the routine row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchContext {
    pub opponent_name: String,
    pub opponent_style: String,
    #[serde(default)]
    pub match_history: Option<String>,
    pub strategy_template: StrategyTemplate,
    pub mood: String,
    pub energy_level: i32,
    pub hydration_today_ml: i32,
    pub match_duration: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRoutineRequest {
    pub athlete_profile_id: Uuid,
    #[serde(flatten)]
    pub context: MatchContext,
}

/// Checks the match context before any profile lookup or LLM call.
pub fn validate_match_context(ctx: &MatchContext) -> Result<(), AppError> {
    let mut problems = Vec::new();

    let plan = &ctx.strategy_template;
    for (field, value) in [
        ("opponent_name", &ctx.opponent_name),
        ("opponent_style", &ctx.opponent_style),
        ("mood", &ctx.mood),
        ("match_duration", &ctx.match_duration),
        ("strategy_template.primary_plan", &plan.primary_plan),
        ("strategy_template.opponent_tendencies", &plan.opponent_tendencies),
        ("strategy_template.situations_to_avoid", &plan.situations_to_avoid),
        ("strategy_template.strengths_to_emphasize", &plan.strengths_to_emphasize),
    ] {
        if value.trim().is_empty() {
            problems.push(format!("{field} cannot be empty"));
        }
    }

    if !(1..=10).contains(&ctx.energy_level) {
        problems.push("energy_level must be between 1 and 10".to_string());
    }
    if ctx.hydration_today_ml < 0 {
        problems.push("hydration_today_ml cannot be negative".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}


#[cfg(test)]
mod tests {
    use super::tests_support::sample_context;
    use super::*;

    #[test]
    fn test_valid_context_passes() {
        assert!(validate_match_context(&sample_context()).is_ok());
    }

    #[test]
    fn test_energy_level_bounds() {
        for level in [0, 11, -3] {
            let mut ctx = sample_context();
            ctx.energy_level = level;
            assert!(matches!(
                validate_match_context(&ctx),
                Err(AppError::Validation(msg)) if msg.contains("energy_level")
            ));
        }
        for level in [1, 10] {
            let mut ctx = sample_context();
            ctx.energy_level = level;
            assert!(validate_match_context(&ctx).is_ok());
        }
    }

    #[test]
    fn test_blank_strategy_fields_are_reported() {
        let mut ctx = sample_context();
        ctx.strategy_template.primary_plan = " ".to_string();
        ctx.hydration_today_ml = -1;
        match validate_match_context(&ctx) {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("strategy_template.primary_plan"));
                assert!(msg.contains("hydration_today_ml"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_request_body_is_flat() {
        let body = serde_json::json!({
            "athlete_profile_id": "6f1c2d3e-0000-4000-8000-000000000001",
            "opponent_name": "Serena",
            "opponent_style": "Baseline",
            "strategy_template": {
                "primary_plan": "a",
                "opponent_tendencies": "b",
                "situations_to_avoid": "c",
                "strengths_to_emphasize": "d"
            },
            "mood": "Focused",
            "energy_level": 6,
            "hydration_today_ml": 500,
            "match_duration": "90 minutes"
        });
        let req: GenerateRoutineRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.context.opponent_name, "Serena");
        assert_eq!(req.context.match_history, None);
        assert_eq!(req.context.strategy_template.coach_reminders, None);
    }
}
