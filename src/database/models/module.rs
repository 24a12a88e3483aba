use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::models::user::User;
use crate::types::{ModuleId, UserId};

/// Rectangular canvas owned by a single user. `user_id` never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub w: Option<i32>,
    pub h: Option<i32>,
    pub public: bool,
    pub created_at: DateTime<Utc>,
    pub user_id: UserId,
}

impl Module {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Module joined with its author, as returned by store lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    pub module: Module,
    pub author: User,
}
