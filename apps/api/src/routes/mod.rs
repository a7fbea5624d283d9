pub mod health;
pub mod resumes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload).get(resumes::handle_list),
        )
        // Registered before /:id so "export" is not read as an id.
        .route("/api/v1/resumes/export", get(resumes::handle_export))
        .route("/api/v1/resumes/:id", get(resumes::handle_get))
        .with_state(state)
}
