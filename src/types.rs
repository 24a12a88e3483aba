/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type ModuleId = i64;
pub type PlateId = i64;
pub type ColorId = i64;

/// Operations a caller can request against modules, plates and users.
/// Used by the ownership guard and by handlers for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListPublicModules,
    ListProviders,
    ReadModule,
    CreateModule,
    EditModule,
    DeleteModule,
    ListPlates,
    CreatePlate,
    EditPlate,
    DeletePlate,
    ListColors,
    ReadUser,
    EditUser,
}

impl Operation {
    /// Operations that anyone may perform without a token
    pub fn is_public(&self) -> bool {
        matches!(self, Operation::ListPublicModules | Operation::ListProviders)
    }
}

/// Resource families that can be looked up by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Module,
    Plate,
    User,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Module => "Module",
            ResourceKind::Plate => "Plate",
            ResourceKind::User => "User",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
