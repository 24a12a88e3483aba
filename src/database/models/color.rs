use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::ColorId;

/// Shared palette entry referenced by plates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
    pub hex: String,
}
