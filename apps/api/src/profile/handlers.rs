//! Axum route handlers for the Athlete Profile API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::athlete::AthleteProfileRow;
use crate::profile::store::{get_owned_profile, get_profile_for_user, insert_profile, update_profile};
use crate::profile::validation::{validate_profile, ProfileInput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// PATCH body. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub sport: Option<String>,
    pub position: Option<String>,
    pub level_of_play: Option<String>,
    pub preferred_match_time: Option<String>,
    pub hydration_habits: Option<String>,
    pub diet_type: Option<String>,
    pub mental_tendencies: Option<String>,
    pub performs_best_when: Option<String>,
}

impl UpdateProfileRequest {
    /// Overlays the patch on the stored row, producing the full input to validate.
    pub fn merge_onto(self, current: &AthleteProfileRow) -> ProfileInput {
        ProfileInput {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            height_cm: self.height_cm.unwrap_or(current.height_cm),
            weight_kg: self.weight_kg.unwrap_or(current.weight_kg),
            age: self.age.or(current.age),
            gender: self.gender.or_else(|| current.gender.clone()),
            sport: self.sport.unwrap_or_else(|| current.sport.clone()),
            position: self.position.or_else(|| current.position.clone()),
            level_of_play: self
                .level_of_play
                .unwrap_or_else(|| current.level_of_play.clone()),
            preferred_match_time: self
                .preferred_match_time
                .unwrap_or_else(|| current.preferred_match_time.clone()),
            hydration_habits: self
                .hydration_habits
                .unwrap_or_else(|| current.hydration_habits.clone()),
            diet_type: self.diet_type.or_else(|| current.diet_type.clone()),
            mental_tendencies: self
                .mental_tendencies
                .unwrap_or_else(|| current.mental_tendencies.clone()),
            performs_best_when: self
                .performs_best_when
                .unwrap_or_else(|| current.performs_best_when.clone()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/athlete-profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<AthleteProfileRow>, AppError> {
    let profile = get_profile_for_user(&state.db, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No athlete profile for this account".to_string()))?;
    Ok(Json(profile))
}

/// POST /api/v1/athlete-profile
///
/// Creates the requester's profile. An account has at most one; a second create is a conflict.
pub async fn handle_create_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ProfileInput>,
) -> Result<(StatusCode, Json<AthleteProfileRow>), AppError> {
    validate_profile(&input)?;

    if get_profile_for_user(&state.db, user.user_id).await?.is_some() {
        return Err(profile_exists());
    }

    // user_id is unique, so a concurrent create loses here instead of duplicating.
    let profile = insert_profile(&state.db, user.user_id, &input)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => profile_exists(),
            other => AppError::Database(other),
        })?;
    info!("Created athlete profile {} for user {}", profile.id, user.user_id);
    Ok((StatusCode::CREATED, Json(profile)))
}

fn profile_exists() -> AppError {
    AppError::Conflict("An athlete profile already exists for this account".to_string())
}

/// PATCH /api/v1/athlete-profile/:id
pub async fn handle_update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateProfileRequest>,
) -> Result<Json<AthleteProfileRow>, AppError> {
    let current = get_owned_profile(&state.db, &user, id).await?;
    let merged = patch.merge_onto(&current);
    validate_profile(&merged)?;

    let updated = update_profile(&state.db, id, &merged).await?;
    info!("Updated athlete profile {id}");
    Ok(Json(updated))
}
