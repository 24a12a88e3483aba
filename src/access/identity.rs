//! Caller identity from the verified token payload.

use serde_json::Value;
use thiserror::Error;

use crate::access::error::AccessError;
use crate::database::models::User;
use crate::database::Store;
use crate::types::UserId;

/// Claims object attached to the request by the token middleware.
/// Expected shape: `{ "user": { "id": <integer> }, ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPayload(pub Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("no token payload on request")]
    Missing,
    #[error("token payload has no user id")]
    MissingUserId,
    #[error("token user id is not a positive integer")]
    MalformedUserId,
}

/// Extract the caller id without touching storage
pub fn caller_id(payload: Option<&TokenPayload>) -> Result<UserId, IdentityError> {
    let TokenPayload(claims) = payload.ok_or(IdentityError::Missing)?;
    let raw = claims
        .get("user")
        .and_then(|user| user.get("id"))
        .ok_or(IdentityError::MissingUserId)?;

    let id = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(IdentityError::MalformedUserId),
    }
}

/// Resolve the payload to a stored user.
///
/// An unknown user id is reported exactly like a missing token, so callers
/// cannot probe which ids exist.
pub async fn authenticate(
    store: &dyn Store,
    payload: Option<&TokenPayload>,
) -> Result<User, AccessError> {
    let id = caller_id(payload).map_err(|e| {
        tracing::debug!("Identity rejected: {}", e);
        AccessError::Unauthenticated
    })?;

    match store.user_by_id(id).await? {
        Some(user) => Ok(user),
        None => {
            tracing::debug!("Identity rejected: user {} does not exist", id);
            Err(AccessError::Unauthenticated)
        }
    }
}
