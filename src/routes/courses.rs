use crate::error::{AppError, Result};
use crate::models::{CourseRequest, FreeTextSearchParams, SearchResponse};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use std::sync::Arc;

/// POST /courses/search
/// Build and store a course from structured preferences
pub async fn create_course(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CourseRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    let Json(request) = payload?;
    request.validate().map_err(AppError::InvalidRequest)?;
    let prefs = request.into_preferences();

    tracing::info!(
        region = %prefs.region,
        transport = %prefs.transport,
        theme = ?prefs.theme,
        "Course request: region={}, transport={}",
        prefs.region, prefs.transport
    );

    let response = state
        .course_builder
        .build_course(prefs, state.persister.as_ref())
        .await?;

    Ok(Json(response))
}

/// GET /courses/search?query=
/// Free-text variant: the query is the region, ordering is random
pub async fn search_courses(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<FreeTextSearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>> {
    let Query(params) = params?;
    let prefs = params.into_preferences().map_err(AppError::InvalidRequest)?;

    tracing::info!(region = %prefs.region, "Free-text course request: '{}'", prefs.region);

    let response = state
        .course_builder
        .build_course(prefs, state.persister.as_ref())
        .await?;

    Ok(Json(response))
}
