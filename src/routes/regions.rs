use crate::error::{AppError, Result};
use crate::services::lucky_region::{pick_lucky_region, LuckyRegion};
use axum::Json;

/// GET /regions/lucky
pub async fn lucky_region() -> Result<Json<LuckyRegion>> {
    let picked = pick_lucky_region(&mut rand::rng())
        .ok_or_else(|| AppError::NotFound("No lucky regions configured".to_string()))?;

    tracing::debug!(region = picked.name, "Lucky region drawn");
    Ok(Json(picked))
}
