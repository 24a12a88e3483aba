use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET /auth/providers - configured login providers
pub async fn list(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.providers.available()))
}

/// GET /auth/providers/:name - provider display data and callback URL.
/// Keys stay server side.
pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let provider = state.providers.provider(&name)?;
    Ok(Json(json!({
        "name": provider.name,
        "code": provider.code,
        "icon": provider.icon,
        "callback": state.providers.callback().map(|url| url.as_str()),
    })))
}
