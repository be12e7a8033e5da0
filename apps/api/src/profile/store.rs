use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{ensure_owner, AuthUser};
use crate::errors::AppError;
use crate::models::athlete::AthleteProfileRow;
use crate::profile::validation::ProfileInput;

/// Returns the requester's profile, if they have one.
pub async fn get_profile_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<AthleteProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, AthleteProfileRow>("SELECT * FROM athlete_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Loads a profile by id and checks it belongs to the requester.
/// Missing → NotFound; someone else's → Forbidden.
pub async fn get_owned_profile(
    pool: &PgPool,
    user: &AuthUser,
    profile_id: Uuid,
) -> Result<AthleteProfileRow, AppError> {
    let profile =
        sqlx::query_as::<_, AthleteProfileRow>("SELECT * FROM athlete_profiles WHERE id = $1")
            .bind(profile_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Athlete profile {profile_id} not found")))?;

    ensure_owner(user, profile.user_id)?;
    Ok(profile)
}

pub async fn insert_profile(
    pool: &PgPool,
    user_id: Uuid,
    input: &ProfileInput,
) -> Result<AthleteProfileRow, sqlx::Error> {
    sqlx::query_as::<_, AthleteProfileRow>(
        r#"
        INSERT INTO athlete_profiles
            (id, user_id, name, height_cm, weight_kg, age, gender, sport, position,
             level_of_play, preferred_match_time, hydration_habits, diet_type,
             mental_tendencies, performs_best_when)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&input.name)
    .bind(input.height_cm)
    .bind(input.weight_kg)
    .bind(input.age)
    .bind(&input.gender)
    .bind(&input.sport)
    .bind(&input.position)
    .bind(&input.level_of_play)
    .bind(&input.preferred_match_time)
    .bind(&input.hydration_habits)
    .bind(&input.diet_type)
    .bind(&input.mental_tendencies)
    .bind(&input.performs_best_when)
    .fetch_one(pool)
    .await
}

/// Overwrites the mutable columns. id, user_id and created_at are never touched.
pub async fn update_profile(
    pool: &PgPool,
    profile_id: Uuid,
    input: &ProfileInput,
) -> Result<AthleteProfileRow, sqlx::Error> {
    sqlx::query_as::<_, AthleteProfileRow>(
        r#"
        UPDATE athlete_profiles SET
            name = $2, height_cm = $3, weight_kg = $4, age = $5, gender = $6,
            sport = $7, position = $8, level_of_play = $9, preferred_match_time = $10,
            hydration_habits = $11, diet_type = $12, mental_tendencies = $13,
            performs_best_when = $14, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(profile_id)
    .bind(&input.name)
    .bind(input.height_cm)
    .bind(input.weight_kg)
    .bind(input.age)
    .bind(&input.gender)
    .bind(&input.sport)
    .bind(&input.position)
    .bind(&input.level_of_play)
    .bind(&input.preferred_match_time)
    .bind(&input.hydration_habits)
    .bind(&input.diet_type)
    .bind(&input.mental_tendencies)
    .bind(&input.performs_best_when)
    .fetch_one(pool)
    .await
}
