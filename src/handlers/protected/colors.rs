use axum::{extract::State, Extension, Json};
use serde_json::Value;

use crate::access::TokenPayload;
use crate::api::format::color_json;
use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::token;
use crate::services::UserService;

/// GET /api/v1/colors
pub async fn list(
    State(state): State<AppState>,
    payload: Option<Extension<TokenPayload>>,
) -> Result<Json<Value>, ApiError> {
    let colors = UserService::new(state.store.as_ref())
        .colors(token(&payload))
        .await?;
    Ok(Json(Value::Array(colors.iter().map(color_json).collect())))
}
