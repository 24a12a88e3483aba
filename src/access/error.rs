use thiserror::Error;

use crate::access::fields::FieldError;
use crate::database::StoreError;
use crate::types::ResourceKind;

/// Why an authenticated caller was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    EditModule,
    DeleteModule,
    EditUser,
}

impl std::fmt::Display for ForbiddenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ForbiddenReason::EditModule => "Can't edit someone else's module",
            ForbiddenReason::DeleteModule => "Not owner",
            ForbiddenReason::EditUser => "Can't edit someone else's profile",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Save,
    Delete,
}

impl std::fmt::Display for WriteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WriteOp::Save => "saving",
            WriteOp::Delete => "deletion",
        })
    }
}

/// Domain outcome of an action that did not succeed.
///
/// `Unauthenticated` and `Forbidden` stay separate here even though the
/// HTTP layer currently answers both with 401.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Invalid token")]
    Unauthenticated,

    #[error("{0} not found")]
    NotFound(ResourceKind),

    #[error("{0}")]
    Forbidden(ForbiddenReason),

    #[error("Invalid content")]
    InvalidContent,

    #[error("Invalid user id")]
    InvalidUserId,

    #[error("{resource} {op} failed")]
    PersistenceFailure { resource: ResourceKind, op: WriteOp },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AccessError {
    pub fn persistence(resource: ResourceKind, op: WriteOp) -> Self {
        AccessError::PersistenceFailure { resource, op }
    }
}

impl From<FieldError> for AccessError {
    fn from(err: FieldError) -> Self {
        tracing::debug!("Rejecting request body: {}", err);
        AccessError::InvalidContent
    }
}
