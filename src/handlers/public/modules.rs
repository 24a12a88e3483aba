use axum::{extract::State, Json};
use serde_json::Value;

use crate::api::format::modules_json;
use crate::app::AppState;
use crate::error::ApiError;
use crate::services::ModuleService;

/// GET /api/v1/modules - public modules in creation order
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let modules = ModuleService::new(state.store.as_ref()).list_public().await?;
    Ok(Json(modules_json(&modules)))
}
