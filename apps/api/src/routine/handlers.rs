//! Axum route handlers for the Routine API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::routine::RoutineRow;
use crate::nutrition::{calculate, NutritionCalcs, NutritionInputs};
use crate::profile::store::{get_owned_profile, get_profile_for_user};
use crate::routine::display::{build_view, RoutineView};
use crate::routine::generator::compose_routine;
use crate::routine::store::{get_owned_routine, insert_routine, list_routines_for_user};
use crate::routine::{validate_match_context, GenerateRoutineRequest};
use crate::speech::discard_audio;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateRoutineResponse {
    pub routine: RoutineRow,
    pub nutrition: NutritionCalcs,
    pub view: RoutineView,
}

#[derive(Debug, Serialize)]
pub struct RoutineDetailResponse {
    pub routine: RoutineRow,
    pub view: RoutineView,
}

#[derive(Debug, Deserialize)]
pub struct NutritionQuery {
    #[serde(default)]
    pub match_duration: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/routines/generate
///
/// Validates the match context, then runs the generation pipeline against the
/// requester's profile and stores the result.
pub async fn handle_generate_routine(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<GenerateRoutineRequest>,
) -> Result<(StatusCode, Json<GenerateRoutineResponse>), AppError> {
    validate_match_context(&request.context)?;

    let profile = get_owned_profile(&state.db, &user, request.athlete_profile_id).await?;

    let composed = compose_routine(
        &state.llm,
        &state.speech,
        state.audio_store.as_ref(),
        &profile,
        &request.context,
    )
    .await?;

    let routine = match insert_routine(&state.db, profile.id, &request.context, &composed).await
    {
        Ok(routine) => routine,
        Err(e) => {
            if let Some(url) = composed.routine_audio_url.as_deref() {
                discard_audio(state.audio_store.as_ref(), url).await;
            }
            return Err(e.into());
        }
    };
    let view = build_view(&routine.routine_text);

    Ok((
        StatusCode::CREATED,
        Json(GenerateRoutineResponse {
            routine,
            nutrition: composed.nutrition,
            view,
        }),
    ))
}

/// GET /api/v1/routines
pub async fn handle_list_routines(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<RoutineRow>>, AppError> {
    let routines = list_routines_for_user(&state.db, user.user_id).await?;
    Ok(Json(routines))
}

/// GET /api/v1/routines/:id
pub async fn handle_get_routine(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RoutineDetailResponse>, AppError> {
    let routine = get_owned_routine(&state.db, &user, id).await?;
    let view = build_view(&routine.routine_text);
    Ok(Json(RoutineDetailResponse { routine, view }))
}

/// GET /api/v1/nutrition?match_duration=…
///
/// Preview of the targets a generation would use. A missing duration uses the default.
pub async fn handle_nutrition_preview(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<NutritionQuery>,
) -> Result<Json<NutritionCalcs>, AppError> {
    let profile = get_profile_for_user(&state.db, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No athlete profile for this account".to_string()))?;

    let duration = query.match_duration.unwrap_or_default();
    Ok(Json(calculate(&NutritionInputs::for_match(&profile, &duration))))
}
