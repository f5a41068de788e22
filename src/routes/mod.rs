pub mod courses;
pub mod debug;
pub mod regions;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/courses/search",
            post(courses::create_course).get(courses::search_courses),
        )
        .route("/regions/lucky", get(regions::lucky_region))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
