//! Ownership guard.
//!
//! `decide` is a pure function over (operation, caller, target). Checks run
//! in a fixed order: identity, then existence, then ownership. Plate
//! operations are gated on identity and module existence only.

use crate::access::error::{AccessError, ForbiddenReason};
use crate::database::models::{Module, ModuleRecord, User};
use crate::types::{Operation, ResourceKind};

/// Resolved resource an operation acts on
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// Collection-level operations (list, create)
    None,
    /// Module itself, or the module that contains the plate being acted on
    Module(Option<&'a Module>),
    User(Option<&'a User>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    DenyUnauthenticated,
    DenyForbidden(ForbiddenReason),
    DenyNotFound(ResourceKind),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> Result<(), AccessError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::DenyUnauthenticated => Err(AccessError::Unauthenticated),
            Decision::DenyForbidden(reason) => Err(AccessError::Forbidden(reason)),
            Decision::DenyNotFound(kind) => Err(AccessError::NotFound(kind)),
        }
    }
}

pub fn decide(op: Operation, caller: Option<&User>, target: Target<'_>) -> Decision {
    if op.is_public() {
        return Decision::Allow;
    }

    let Some(caller) = caller else {
        return Decision::DenyUnauthenticated;
    };

    match target {
        Target::None => Decision::Allow,
        Target::Module(None) => Decision::DenyNotFound(ResourceKind::Module),
        Target::User(None) => Decision::DenyNotFound(ResourceKind::User),
        Target::Module(Some(module)) => match forbidden_reason(op) {
            Some(reason) if !module.is_owned_by(caller.id) => Decision::DenyForbidden(reason),
            _ => Decision::Allow,
        },
        Target::User(Some(user)) => match forbidden_reason(op) {
            Some(reason) if user.id != caller.id => Decision::DenyForbidden(reason),
            _ => Decision::Allow,
        },
    }
}

fn forbidden_reason(op: Operation) -> Option<ForbiddenReason> {
    match op {
        Operation::EditModule => Some(ForbiddenReason::EditModule),
        Operation::DeleteModule => Some(ForbiddenReason::DeleteModule),
        Operation::EditUser => Some(ForbiddenReason::EditUser),
        _ => None,
    }
}

/// Gate an operation on a looked-up module, handing the record back on success
pub fn authorize_module(
    op: Operation,
    caller: &User,
    record: Option<ModuleRecord>,
) -> Result<ModuleRecord, AccessError> {
    let decision = decide(op, Some(caller), Target::Module(record.as_ref().map(|r| &r.module)));
    if !decision.is_allowed() {
        tracing::debug!(?op, caller = caller.id, ?decision, "Module access denied");
    }
    decision.into_result()?;
    record.ok_or(AccessError::NotFound(ResourceKind::Module))
}

pub fn authorize_user(op: Operation, caller: &User, user: Option<User>) -> Result<User, AccessError> {
    let decision = decide(op, Some(caller), Target::User(user.as_ref()));
    if !decision.is_allowed() {
        tracing::debug!(?op, caller = caller.id, ?decision, "User access denied");
    }
    decision.into_result()?;
    user.ok_or(AccessError::NotFound(ResourceKind::User))
}
