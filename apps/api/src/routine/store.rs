use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{ensure_owner, AuthUser};
use crate::errors::AppError;
use crate::models::routine::RoutineRow;
use crate::routine::generator::ComposedRoutine;
use crate::routine::MatchContext;

/// Routines are insert-only. The match context is snapshotted into the row.
pub async fn insert_routine(
    pool: &PgPool,
    athlete_profile_id: Uuid,
    ctx: &MatchContext,
    composed: &ComposedRoutine,
) -> Result<RoutineRow, sqlx::Error> {
    sqlx::query_as::<_, RoutineRow>(
        r#"
        INSERT INTO routines
            (id, athlete_profile_id, opponent_name, opponent_style, match_history,
             strategy_template, mood, energy_level, hydration_today_ml, match_duration,
             routine_text, meditation_script, routine_audio_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(athlete_profile_id)
    .bind(&ctx.opponent_name)
    .bind(&ctx.opponent_style)
    .bind(&ctx.match_history)
    .bind(Json(&ctx.strategy_template))
    .bind(&ctx.mood)
    .bind(ctx.energy_level)
    .bind(ctx.hydration_today_ml)
    .bind(&ctx.match_duration)
    .bind(&composed.routine_text)
    .bind(&composed.meditation_script)
    .bind(&composed.routine_audio_url)
    .fetch_one(pool)
    .await
}

/// Every routine across the requester's profile, newest first.
pub async fn list_routines_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<RoutineRow>, sqlx::Error> {
    sqlx::query_as::<_, RoutineRow>(
        r#"
        SELECT r.*
        FROM routines r
        JOIN athlete_profiles p ON p.id = r.athlete_profile_id
        WHERE p.user_id = $1
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Missing → NotFound; owned by another account → Forbidden.
pub async fn get_owned_routine(
    pool: &PgPool,
    user: &AuthUser,
    routine_id: Uuid,
) -> Result<RoutineRow, AppError> {
    let routine = sqlx::query_as::<_, RoutineRow>("SELECT * FROM routines WHERE id = $1")
        .bind(routine_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Routine {routine_id} not found")))?;

    let owner_id: Uuid =
        sqlx::query_scalar("SELECT user_id FROM athlete_profiles WHERE id = $1")
            .bind(routine.athlete_profile_id)
            .fetch_one(pool)
            .await?;

    ensure_owner(user, owner_id)?;
    Ok(routine)
}
