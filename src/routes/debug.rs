use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if services are working
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    // Course store
    match state.persister.health_check().await {
        Ok(()) => {
            status["checks"]["store"] = json!({
                "backend": state.persister.backend_name(),
                "status": "ok"
            });
        }
        Err(e) => {
            status["checks"]["store"] = json!({
                "backend": state.persister.backend_name(),
                "error": e.to_string()
            });
            status["status"] = json!("error");
        }
    }

    // Level cache, optional
    match state.cache {
        Some(ref cache) => {
            let cache_status = cache.status().await;
            status["checks"]["cache"] = json!({
                "backend": cache.backend_name(),
                "status": if cache_status.healthy { "ok" } else { "error" },
                "stats": cache_status
            });
            if !cache_status.healthy && status["status"] == "ok" {
                status["status"] = json!("degraded");
            }
        }
        None => {
            status["checks"]["cache"] = json!("disabled");
        }
    }

    Json(status)
}
