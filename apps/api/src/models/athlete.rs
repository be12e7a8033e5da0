use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One profile per user account. `id` and `user_id` never change after insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AthleteProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub sport: String,
    pub position: Option<String>,
    pub level_of_play: String,
    pub preferred_match_time: String,
    pub hydration_habits: String,
    pub diet_type: Option<String>,
    pub mental_tendencies: String,
    pub performs_best_when: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
