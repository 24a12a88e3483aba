use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    Extension, Json,
};
use serde_json::Value;

use crate::access::TokenPayload;
use crate::api::format::user_json;
use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::{fields, token};
use crate::services::UserService;

/// GET /api/v1/user - the caller's own profile
pub async fn self_get(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
) -> Result<Json<Value>, ApiError> {
    let profile = UserService::new(state.store.as_ref())
        .read_self(token(&payload))
        .await?;
    Ok(Json(user_json(&profile)))
}

/// PUT|POST /api/v1/user - no id given, always "Invalid user id" for a valid caller
pub async fn self_put(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = fields(&state, &payload, body).await?;
    let profile = UserService::new(state.store.as_ref())
        .edit(token(&payload), None, &body)
        .await?;
    Ok(Json(user_json(&profile)))
}

/// GET /api/v1/users/:id
pub async fn get(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let profile = UserService::new(state.store.as_ref())
        .read(token(&payload), Some(&id))
        .await?;
    Ok(Json(user_json(&profile)))
}

/// PUT|POST /api/v1/users/:id - rename, self only
pub async fn put(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = fields(&state, &payload, body).await?;
    let profile = UserService::new(state.store.as_ref())
        .edit(token(&payload), Some(&id), &body)
        .await?;
    Ok(Json(user_json(&profile)))
}
