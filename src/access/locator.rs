//! Resource lookup from raw path parameters.
//!
//! Ids that are missing or not numeric are indistinguishable from ids that
//! do not exist: both come back as `None`.

use crate::database::models::{ModuleRecord, PlateRecord, User};
use crate::database::{Store, StoreError};
use crate::types::ModuleId;

/// Coerce a path segment to a positive integer id
pub fn parse_id(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

pub async fn find_module(
    store: &dyn Store,
    raw_id: Option<&str>,
) -> Result<Option<ModuleRecord>, StoreError> {
    match parse_id(raw_id) {
        Some(id) => store.module_by_id(id).await,
        None => Ok(None),
    }
}

/// Find a plate that belongs to `module_id`. A plate of another module is
/// treated as absent.
pub async fn find_plate(
    store: &dyn Store,
    module_id: ModuleId,
    raw_plate_id: Option<&str>,
) -> Result<Option<PlateRecord>, StoreError> {
    let Some(id) = parse_id(raw_plate_id) else {
        return Ok(None);
    };
    let plate = store.plate_by_id(id).await?;
    Ok(plate.filter(|record| record.plate.module_id == module_id))
}

pub async fn find_user(store: &dyn Store, raw_id: Option<&str>) -> Result<Option<User>, StoreError> {
    match parse_id(raw_id) {
        Some(id) => store.user_by_id(id).await,
        None => Ok(None),
    }
}
