use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::models::{Color, Module, ModuleRecord, NewPlate, Plate, PlateRecord, User};
use crate::database::store::{Store, StoreError};
use crate::types::{ColorId, ModuleId, PlateId, UserId};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    colors: BTreeMap<ColorId, Color>,
    modules: BTreeMap<ModuleId, Module>,
    plates: BTreeMap<PlateId, Plate>,
    next_user: UserId,
    next_color: ColorId,
    next_module: ModuleId,
    next_plate: PlateId,
}

impl Tables {
    fn module_record(&self, module: &Module) -> Result<ModuleRecord, StoreError> {
        let author = self
            .users
            .get(&module.user_id)
            .cloned()
            .ok_or_else(|| StoreError::Constraint(format!("module {} has no author", module.id)))?;
        Ok(ModuleRecord {
            module: module.clone(),
            author,
        })
    }

    fn plate_record(&self, plate: &Plate) -> Result<PlateRecord, StoreError> {
        let color = self
            .colors
            .get(&plate.color_id)
            .cloned()
            .ok_or_else(|| StoreError::Constraint(format!("plate {} has no color", plate.id)))?;
        Ok(PlateRecord {
            plate: plate.clone(),
            color,
        })
    }

    fn check_color(&self, color_id: ColorId) -> Result<(), StoreError> {
        if self.colors.contains_key(&color_id) {
            Ok(())
        } else {
            Err(StoreError::Constraint(format!("color {} does not exist", color_id)))
        }
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Process-local store used by tests and by development runs without a database.
/// Ids start at 1 and are never reused, like a serial column.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let user = User {
            id: next_id(&mut tables.next_user),
            name: name.to_string(),
            email: email.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("user {}", user.id))),
        }
    }

    async fn create_color(&self, name: &str, hex: &str) -> Result<Color, StoreError> {
        let mut tables = self.tables.write().await;
        let color = Color {
            id: next_id(&mut tables.next_color),
            name: name.to_string(),
            hex: hex.to_string(),
        };
        tables.colors.insert(color.id, color.clone());
        Ok(color)
    }

    async fn colors(&self) -> Result<Vec<Color>, StoreError> {
        Ok(self.tables.read().await.colors.values().cloned().collect())
    }

    async fn create_module(&self, name: &str, owner: UserId) -> Result<ModuleRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&owner) {
            return Err(StoreError::Constraint(format!("user {} does not exist", owner)));
        }
        let module = Module {
            id: next_id(&mut tables.next_module),
            name: name.to_string(),
            w: None,
            h: None,
            public: true,
            created_at: Utc::now(),
            user_id: owner,
        };
        tables.modules.insert(module.id, module.clone());
        tables.module_record(&module)
    }

    async fn module_by_id(&self, id: ModuleId) -> Result<Option<ModuleRecord>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .modules
            .get(&id)
            .map(|module| tables.module_record(module))
            .transpose()
    }

    async fn public_modules(&self) -> Result<Vec<ModuleRecord>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .modules
            .values()
            .filter(|module| module.public)
            .map(|module| tables.module_record(module))
            .collect()
    }

    async fn modules_by_owner(&self, owner: UserId) -> Result<Vec<ModuleRecord>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .modules
            .values()
            .filter(|module| module.user_id == owner)
            .map(|module| tables.module_record(module))
            .collect()
    }

    async fn save_module(&self, module: &Module) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let existing = tables
            .modules
            .get_mut(&module.id)
            .ok_or_else(|| StoreError::NotFound(format!("module {}", module.id)))?;
        // Owner and creation time are fixed at insert
        existing.name = module.name.clone();
        existing.w = module.w;
        existing.h = module.h;
        existing.public = module.public;
        Ok(())
    }

    async fn delete_module(&self, id: ModuleId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.modules.remove(&id).is_none() {
            return Ok(false);
        }
        tables.plates.retain(|_, plate| plate.module_id != id);
        Ok(true)
    }

    async fn plates_of_module(&self, module_id: ModuleId) -> Result<Vec<PlateRecord>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .plates
            .values()
            .filter(|plate| plate.module_id == module_id)
            .map(|plate| tables.plate_record(plate))
            .collect()
    }

    async fn plate_by_id(&self, id: PlateId) -> Result<Option<PlateRecord>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .plates
            .get(&id)
            .map(|plate| tables.plate_record(plate))
            .transpose()
    }

    async fn create_plate(&self, new_plate: &NewPlate) -> Result<PlateRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.modules.contains_key(&new_plate.module_id) {
            return Err(StoreError::Constraint(format!(
                "module {} does not exist",
                new_plate.module_id
            )));
        }
        tables.check_color(new_plate.color_id)?;

        let plate = Plate {
            id: next_id(&mut tables.next_plate),
            module_id: new_plate.module_id,
            x: new_plate.x,
            y: new_plate.y,
            z: new_plate.z,
            h: new_plate.h,
            w: new_plate.w,
            color_id: new_plate.color_id,
        };
        tables.plates.insert(plate.id, plate.clone());
        tables.plate_record(&plate)
    }

    async fn save_plate(&self, plate: &Plate) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_color(plate.color_id)?;
        let existing = tables
            .plates
            .get_mut(&plate.id)
            .ok_or_else(|| StoreError::NotFound(format!("plate {}", plate.id)))?;
        // A plate never moves to another module
        let module_id = existing.module_id;
        *existing = Plate {
            module_id,
            ..plate.clone()
        };
        Ok(())
    }

    async fn delete_plate(&self, id: PlateId) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.plates.remove(&id).is_some())
    }
}
