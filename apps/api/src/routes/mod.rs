pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::profile::handlers as profile;
use crate::routine::handlers as routine;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Athlete profile
        .route(
            "/api/v1/athlete-profile",
            get(profile::handle_get_profile).post(profile::handle_create_profile),
        )
        .route(
            "/api/v1/athlete-profile/:id",
            patch(profile::handle_update_profile),
        )
        // Routines
        .route(
            "/api/v1/routines/generate",
            post(routine::handle_generate_routine),
        )
        .route("/api/v1/routines", get(routine::handle_list_routines))
        .route("/api/v1/routines/:id", get(routine::handle_get_routine))
        .route("/api/v1/nutrition", get(routine::handle_nutrition_preview))
        .with_state(state)
}
