use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;

use crate::access::TokenPayload;
use crate::api::format::{plate_json, plates_json};
use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::{fields, token};
use crate::services::ModuleService;

/// GET /api/v1/modules/:id/plates
pub async fn list(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    Path(module_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let plates = ModuleService::new(state.store.as_ref())
        .list_plates(token(&payload), Some(&module_id))
        .await?;
    Ok(Json(plates_json(&plates)))
}

/// POST /api/v1/modules/:id/plates
pub async fn post(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    Path(module_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = fields(&state, &payload, body).await?;
    let plate = ModuleService::new(state.store.as_ref())
        .create_plate(token(&payload), Some(&module_id), &body)
        .await?;
    Ok(Json(plate_json(&plate)))
}

/// PUT|PATCH /api/v1/modules/:id/plates/:plate_id
pub async fn put(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    Path((module_id, plate_id)): Path<(String, String)>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = fields(&state, &payload, body).await?;
    let plate = ModuleService::new(state.store.as_ref())
        .edit_plate(token(&payload), Some(&module_id), Some(&plate_id), &body)
        .await?;
    Ok(Json(plate_json(&plate)))
}

/// DELETE /api/v1/modules/:id/plates/:plate_id
pub async fn delete(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    Path((module_id, plate_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    ModuleService::new(state.store.as_ref())
        .delete_plate(token(&payload), Some(&module_id), Some(&plate_id))
        .await?;
    Ok(StatusCode::OK)
}
