// handlers/mod.rs - Two-tier handler layout
//
// Public (no token) → Protected (token payload resolved to a stored user)
//
// The token middleware runs on every route and never rejects; protected
// handlers hand the optional payload to a service, which answers
// "Invalid token" when no user can be resolved.
pub mod protected; // Tier 2: identity required (/api/v1/*)
pub mod public; // Tier 1: no identity required (/, /health, /auth/*, module listing)

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::Extension;
use serde_json::{Map, Value};

use crate::access::fields::parse_body;
use crate::access::identity::authenticate;
use crate::access::TokenPayload;
use crate::app::AppState;
use crate::error::ApiError;

/// Unwrap the optional payload extension added by the token middleware
pub(crate) fn token(payload: &Option<Extension<TokenPayload>>) -> Option<&TokenPayload> {
    payload.as_ref().map(|Extension(p)| p)
}

/// Field map of a request body. A body that could not be buffered (over the
/// size limit) is rejected as invalid content, but only once the caller has
/// been identified, so anonymous requests still get "Invalid token".
pub(crate) async fn fields(
    state: &AppState,
    payload: &Option<Extension<TokenPayload>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Map<String, Value>, ApiError> {
    match body {
        Ok(body) => Ok(parse_body(&body)),
        Err(rejection) => {
            authenticate(state.store.as_ref(), token(payload)).await?;
            tracing::debug!("Unreadable request body: {}", rejection);
            Err(ApiError::InvalidContent)
        }
    }
}
