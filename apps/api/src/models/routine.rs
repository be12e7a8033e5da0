use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Structured game plan captured with each match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyTemplate {
    pub primary_plan: String,
    pub opponent_tendencies: String,
    pub situations_to_avoid: String,
    pub strengths_to_emphasize: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_reminders: Option<String>,
}

/// A generated routine. Insert-only: rows are never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoutineRow {
    pub id: Uuid,
    pub athlete_profile_id: Uuid,
    pub opponent_name: String,
    pub opponent_style: String,
    pub match_history: Option<String>,
    pub strategy_template: Json<StrategyTemplate>,
    pub mood: String,
    pub energy_level: i32,
    pub hydration_today_ml: i32,
    pub match_duration: String,
    pub routine_text: String,
    pub meditation_script: Option<String>,
    pub routine_audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
