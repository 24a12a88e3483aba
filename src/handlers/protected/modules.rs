use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;

use crate::access::TokenPayload;
use crate::api::format::module_json;
use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::{fields, token};
use crate::services::ModuleService;

/// POST /api/v1/modules - create a module owned by the caller
pub async fn post(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = fields(&state, &payload, body).await?;
    let detail = ModuleService::new(state.store.as_ref())
        .create(token(&payload), &body)
        .await?;
    Ok(Json(module_json(&detail)))
}

/// GET /api/v1/modules/:id
pub async fn get(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let detail = ModuleService::new(state.store.as_ref())
        .read(token(&payload), Some(&id))
        .await?;
    Ok(Json(module_json(&detail)))
}

/// PUT|PATCH /api/v1/modules/:id - owner only
pub async fn put(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = fields(&state, &payload, body).await?;
    let detail = ModuleService::new(state.store.as_ref())
        .edit(token(&payload), Some(&id), &body)
        .await?;
    Ok(Json(module_json(&detail)))
}

/// DELETE /api/v1/modules/:id - owner only, empty body on success
pub async fn delete(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    ModuleService::new(state.store.as_ref())
        .delete(token(&payload), Some(&id))
        .await?;
    Ok(StatusCode::OK)
}
