use serde_json::{Map, Value};

use crate::access::fields::{self, ModuleField, PlateField};
use crate::access::guard::{self, Target};
use crate::access::{identity, locator, AccessError, TokenPayload, WriteOp};
use crate::database::models::{ModuleRecord, NewPlate, PlateRecord, User};
use crate::database::Store;
use crate::types::{Operation, ResourceKind};

/// Module with its plates, as returned by single-module operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDetail {
    pub record: ModuleRecord,
    pub plates: Vec<PlateRecord>,
}

/// Module and plate operations. Every protected flow runs identity first,
/// then lookup, then the guard, then field projection and storage.
pub struct ModuleService<'a> {
    store: &'a dyn Store,
}

impl<'a> ModuleService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    async fn caller(
        &self,
        op: Operation,
        payload: Option<&TokenPayload>,
    ) -> Result<User, AccessError> {
        let caller = identity::authenticate(self.store, payload).await?;
        tracing::debug!(?op, caller = caller.id, "Authenticated");
        Ok(caller)
    }

    async fn module_for(
        &self,
        op: Operation,
        caller: &User,
        raw_module_id: Option<&str>,
    ) -> Result<ModuleRecord, AccessError> {
        let record = locator::find_module(self.store, raw_module_id).await?;
        guard::authorize_module(op, caller, record)
    }

    async fn detail(&self, record: ModuleRecord) -> Result<ModuleDetail, AccessError> {
        let plates = self.store.plates_of_module(record.module.id).await?;
        Ok(ModuleDetail { record, plates })
    }

    pub async fn list_public(&self) -> Result<Vec<ModuleRecord>, AccessError> {
        guard::decide(Operation::ListPublicModules, None, Target::None).into_result()?;
        Ok(self.store.public_modules().await?)
    }

    pub async fn create(
        &self,
        payload: Option<&TokenPayload>,
        body: &Map<String, Value>,
    ) -> Result<ModuleDetail, AccessError> {
        let caller = self.caller(Operation::CreateModule, payload).await?;
        guard::decide(Operation::CreateModule, Some(&caller), Target::None).into_result()?;

        let projected = fields::project(body, fields::MODULE_CREATE_FIELDS);
        let name = fields::module_name(&projected)?;

        let record = self
            .store
            .create_module(&name, caller.id)
            .await
            .map_err(|e| {
                tracing::warn!("Module insert failed: {}", e);
                AccessError::persistence(ResourceKind::Module, WriteOp::Save)
            })?;
        tracing::info!(module = record.module.id, owner = caller.id, "Module created");

        Ok(ModuleDetail {
            record,
            plates: Vec::new(),
        })
    }

    pub async fn read(
        &self,
        payload: Option<&TokenPayload>,
        raw_module_id: Option<&str>,
    ) -> Result<ModuleDetail, AccessError> {
        let caller = self.caller(Operation::ReadModule, payload).await?;
        let record = self.module_for(Operation::ReadModule, &caller, raw_module_id).await?;
        self.detail(record).await
    }

    pub async fn edit(
        &self,
        payload: Option<&TokenPayload>,
        raw_module_id: Option<&str>,
        body: &Map<String, Value>,
    ) -> Result<ModuleDetail, AccessError> {
        let caller = self.caller(Operation::EditModule, payload).await?;
        let mut record = self.module_for(Operation::EditModule, &caller, raw_module_id).await?;

        let projected = fields::project(body, fields::MODULE_EDIT_FIELDS);
        for update in ModuleField::parse_all(&projected)? {
            update.apply(&mut record.module);
        }

        self.store.save_module(&record.module).await.map_err(|e| {
            tracing::warn!(module = record.module.id, "Module save failed: {}", e);
            AccessError::persistence(ResourceKind::Module, WriteOp::Save)
        })?;

        self.detail(record).await
    }

    pub async fn delete(
        &self,
        payload: Option<&TokenPayload>,
        raw_module_id: Option<&str>,
    ) -> Result<(), AccessError> {
        let caller = self.caller(Operation::DeleteModule, payload).await?;
        let record = self.module_for(Operation::DeleteModule, &caller, raw_module_id).await?;
        let id = record.module.id;

        match self.store.delete_module(id).await {
            Ok(true) => {
                tracing::info!(module = id, "Module deleted");
                Ok(())
            }
            Ok(false) => Err(AccessError::NotFound(ResourceKind::Module)),
            Err(e) => {
                tracing::warn!(module = id, "Module delete failed: {}", e);
                Err(AccessError::persistence(ResourceKind::Module, WriteOp::Delete))
            }
        }
    }

    pub async fn list_plates(
        &self,
        payload: Option<&TokenPayload>,
        raw_module_id: Option<&str>,
    ) -> Result<Vec<PlateRecord>, AccessError> {
        let caller = self.caller(Operation::ListPlates, payload).await?;
        let record = self.module_for(Operation::ListPlates, &caller, raw_module_id).await?;
        Ok(self.store.plates_of_module(record.module.id).await?)
    }

    pub async fn create_plate(
        &self,
        payload: Option<&TokenPayload>,
        raw_module_id: Option<&str>,
        body: &Map<String, Value>,
    ) -> Result<PlateRecord, AccessError> {
        let caller = self.caller(Operation::CreatePlate, payload).await?;
        let record = self.module_for(Operation::CreatePlate, &caller, raw_module_id).await?;

        let updates = plate_updates(body)?;
        let mut plate = NewPlate {
            module_id: record.module.id,
            ..NewPlate::default()
        };
        for update in &updates {
            update.apply_new(&mut plate);
        }

        let created = self.store.create_plate(&plate).await.map_err(|e| {
            tracing::warn!(module = record.module.id, "Plate insert failed: {}", e);
            AccessError::persistence(ResourceKind::Plate, WriteOp::Save)
        })?;
        tracing::info!(module = record.module.id, plate = created.plate.id, "Plate created");
        Ok(created)
    }

    pub async fn edit_plate(
        &self,
        payload: Option<&TokenPayload>,
        raw_module_id: Option<&str>,
        raw_plate_id: Option<&str>,
        body: &Map<String, Value>,
    ) -> Result<PlateRecord, AccessError> {
        let caller = self.caller(Operation::EditPlate, payload).await?;
        let record = self.module_for(Operation::EditPlate, &caller, raw_module_id).await?;
        let mut plate = locator::find_plate(self.store, record.module.id, raw_plate_id)
            .await?
            .ok_or(AccessError::NotFound(ResourceKind::Plate))?
            .plate;

        for update in plate_updates(body)? {
            update.apply(&mut plate);
        }

        self.store.save_plate(&plate).await.map_err(|e| {
            tracing::warn!(plate = plate.id, "Plate save failed: {}", e);
            AccessError::persistence(ResourceKind::Plate, WriteOp::Save)
        })?;

        // the joined color may have changed with color_id
        self.store
            .plate_by_id(plate.id)
            .await?
            .ok_or(AccessError::NotFound(ResourceKind::Plate))
    }

    pub async fn delete_plate(
        &self,
        payload: Option<&TokenPayload>,
        raw_module_id: Option<&str>,
        raw_plate_id: Option<&str>,
    ) -> Result<(), AccessError> {
        let caller = self.caller(Operation::DeletePlate, payload).await?;
        let record = self.module_for(Operation::DeletePlate, &caller, raw_module_id).await?;
        let plate = locator::find_plate(self.store, record.module.id, raw_plate_id)
            .await?
            .ok_or(AccessError::NotFound(ResourceKind::Plate))?;
        let id = plate.plate.id;

        match self.store.delete_plate(id).await {
            Ok(true) => {
                tracing::info!(plate = id, "Plate deleted");
                Ok(())
            }
            Ok(false) => Err(AccessError::NotFound(ResourceKind::Plate)),
            Err(e) => {
                tracing::warn!(plate = id, "Plate delete failed: {}", e);
                Err(AccessError::persistence(ResourceKind::Plate, WriteOp::Delete))
            }
        }
    }
}

/// Plate mutations must carry at least one allow-listed field
fn plate_updates(body: &Map<String, Value>) -> Result<Vec<PlateField>, AccessError> {
    let projected = fields::project(body, fields::PLATE_FIELDS);
    if projected.is_empty() {
        return Err(AccessError::InvalidContent);
    }
    Ok(PlateField::parse_all(&projected)?)
}
