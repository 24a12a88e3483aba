use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::UserId;

/// Account created by the login flow. Only the name may change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}
