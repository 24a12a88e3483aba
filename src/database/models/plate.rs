use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::models::color::Color;
use crate::types::{ColorId, ModuleId, PlateId};

/// Colored rectangle placed inside a module. `module_id` never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Plate {
    pub id: PlateId,
    pub module_id: ModuleId,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub h: i32,
    pub w: i32,
    pub color_id: ColorId,
}

/// Values for a plate that has not been stored yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPlate {
    pub module_id: ModuleId,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub h: i32,
    pub w: i32,
    pub color_id: ColorId,
}

/// Plate joined with its color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateRecord {
    pub plate: Plate,
    pub color: Color,
}
