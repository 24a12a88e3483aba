//! Request authorization: who is calling, what they are acting on, and
//! whether they may.

pub mod error;
pub mod fields;
pub mod guard;
pub mod identity;
pub mod locator;

pub use error::{AccessError, ForbiddenReason, WriteOp};
pub use guard::{decide, Decision, Target};
pub use identity::TokenPayload;
