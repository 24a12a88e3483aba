use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::access::TokenPayload;
use crate::app::AppState;
use crate::auth::decode_jwt;

/// Token middleware that attaches the verified claims to the request.
///
/// Nothing is rejected here: a missing or invalid token simply leaves the
/// request without a `TokenPayload`, and the handler's identity check
/// answers with "Invalid token".
pub async fn token_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    match extract_jwt_from_headers(&headers) {
        Ok(Some(token)) => match decode_jwt(token, &state.config.security.jwt_secret) {
            Ok(claims) => {
                request.extensions_mut().insert(TokenPayload(claims));
            }
            Err(e) => tracing::debug!("Ignoring token: {}", e),
        },
        Ok(None) => {}
        Err(msg) => tracing::debug!("Ignoring Authorization header: {}", msg),
    }

    next.run(request).await
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<Option<&str>, &'static str> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}
