use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - service info
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "LManager API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "providers": "/auth/providers[/:name] (public)",
            "modules": "/api/v1/modules[/:id] (list public, rest protected)",
            "plates": "/api/v1/modules/:id/plates[/:plate_id] (protected)",
            "colors": "/api/v1/colors (protected)",
            "users": "/api/v1/user, /api/v1/users/:id (protected)",
        }
    }))
}

/// GET /health - store probe
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
