use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Color, Module, ModuleRecord, NewPlate, Plate, PlateRecord, User};
use crate::types::{ModuleId, PlateId, UserId};

/// Errors raised by storage adapters
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for users, modules, plates and colors.
///
/// Lookups return `Ok(None)` for missing rows; `Err` is reserved for the
/// store itself failing. Deleting a module removes its plates.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap connectivity probe used by `/health`
    async fn health_check(&self) -> Result<(), StoreError>;

    async fn create_user(&self, name: &str, email: &str) -> Result<User, StoreError>;
    async fn user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;
    async fn save_user(&self, user: &User) -> Result<(), StoreError>;

    async fn create_color(&self, name: &str, hex: &str) -> Result<Color, StoreError>;
    async fn colors(&self) -> Result<Vec<Color>, StoreError>;

    async fn create_module(&self, name: &str, owner: UserId) -> Result<ModuleRecord, StoreError>;
    async fn module_by_id(&self, id: ModuleId) -> Result<Option<ModuleRecord>, StoreError>;
    async fn public_modules(&self) -> Result<Vec<ModuleRecord>, StoreError>;
    async fn modules_by_owner(&self, owner: UserId) -> Result<Vec<ModuleRecord>, StoreError>;
    async fn save_module(&self, module: &Module) -> Result<(), StoreError>;
    /// Returns false when nothing was deleted
    async fn delete_module(&self, id: ModuleId) -> Result<bool, StoreError>;

    /// Plates of a module in insertion order
    async fn plates_of_module(&self, module_id: ModuleId) -> Result<Vec<PlateRecord>, StoreError>;
    async fn plate_by_id(&self, id: PlateId) -> Result<Option<PlateRecord>, StoreError>;
    async fn create_plate(&self, plate: &NewPlate) -> Result<PlateRecord, StoreError>;
    async fn save_plate(&self, plate: &Plate) -> Result<(), StoreError>;
    /// Returns false when nothing was deleted
    async fn delete_plate(&self, id: PlateId) -> Result<bool, StoreError>;
}
