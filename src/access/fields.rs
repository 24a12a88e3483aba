//! Request body projection.
//!
//! Inbound bodies are reduced to the allow-listed keys of the target
//! resource and then turned into typed field updates. Unknown keys are
//! dropped silently; known keys with unusable values are rejected.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::database::models::{Module, NewPlate, Plate, User};
use crate::types::ColorId;

pub const MODULE_CREATE_FIELDS: &[&str] = &["name"];
pub const MODULE_EDIT_FIELDS: &[&str] = &["name", "w", "h"];
pub const PLATE_FIELDS: &[&str] = &["x", "y", "z", "h", "w", "color_id"];
pub const USER_FIELDS: &[&str] = &["name"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field '{0}' is not numeric")]
    NotNumeric(String),
    #[error("field '{0}' is out of range")]
    OutOfRange(String),
    #[error("field '{0}' is not text")]
    NotText(String),
    #[error("field '{0}' is blank")]
    Blank(String),
}

/// Parse a request body into a field map. Anything that is not a JSON
/// object counts as an empty map.
pub fn parse_body(body: &[u8]) -> Map<String, Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Map::new();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            tracing::debug!("Ignoring unparseable request body: {}", e);
            Map::new()
        }
    }
}

/// Keep only the allow-listed keys present in `input`
pub fn project(input: &Map<String, Value>, allowed: &[&str]) -> Map<String, Value> {
    input
        .iter()
        .filter(|(key, _)| allowed.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Integers, floats (truncated toward zero) and numeric strings are accepted
pub fn coerce_int(field: &str, value: &Value) -> Result<i32, FieldError> {
    let wide: i64 = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(f) = n.as_f64() {
                truncate(field, f)?
            } else {
                return Err(FieldError::OutOfRange(field.to_string()));
            }
        }
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => i,
                Err(_) => {
                    let f = s
                        .parse::<f64>()
                        .map_err(|_| FieldError::NotNumeric(field.to_string()))?;
                    truncate(field, f)?
                }
            }
        }
        _ => return Err(FieldError::NotNumeric(field.to_string())),
    };
    i32::try_from(wide).map_err(|_| FieldError::OutOfRange(field.to_string()))
}

fn truncate(field: &str, f: f64) -> Result<i64, FieldError> {
    if !f.is_finite() {
        return Err(FieldError::NotNumeric(field.to_string()));
    }
    let t = f.trunc();
    if t < i64::MIN as f64 || t > i64::MAX as f64 {
        return Err(FieldError::OutOfRange(field.to_string()));
    }
    Ok(t as i64)
}

fn coerce_text(field: &str, value: &Value) -> Result<String, FieldError> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(FieldError::NotText(field.to_string())),
    };
    if text.is_empty() {
        return Err(FieldError::Blank(field.to_string()));
    }
    Ok(text)
}

/// `null` clears an optional dimension
fn coerce_optional_int(field: &str, value: &Value) -> Result<Option<i32>, FieldError> {
    match value {
        Value::Null => Ok(None),
        other => coerce_int(field, other).map(Some),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleField {
    Name(String),
    Width(Option<i32>),
    Height(Option<i32>),
}

impl ModuleField {
    /// Build updates from a map already projected to `MODULE_EDIT_FIELDS`
    pub fn parse_all(fields: &Map<String, Value>) -> Result<Vec<Self>, FieldError> {
        fields
            .iter()
            .filter_map(|(key, value)| match key.as_str() {
                "name" => Some(coerce_text(key, value).map(ModuleField::Name)),
                "w" => Some(coerce_optional_int(key, value).map(ModuleField::Width)),
                "h" => Some(coerce_optional_int(key, value).map(ModuleField::Height)),
                _ => None,
            })
            .collect()
    }

    pub fn apply(&self, module: &mut Module) {
        match self {
            ModuleField::Name(name) => module.name = name.clone(),
            ModuleField::Width(w) => module.w = *w,
            ModuleField::Height(h) => module.h = *h,
        }
    }
}

/// Name for a new module; required and non-blank
pub fn module_name(fields: &Map<String, Value>) -> Result<String, FieldError> {
    let value = fields
        .get("name")
        .ok_or_else(|| FieldError::Blank("name".to_string()))?;
    coerce_text("name", value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateField {
    X(i32),
    Y(i32),
    Z(i32),
    Height(i32),
    Width(i32),
    Color(ColorId),
}

impl PlateField {
    pub fn parse_all(fields: &Map<String, Value>) -> Result<Vec<Self>, FieldError> {
        fields
            .iter()
            .filter_map(|(key, value)| {
                let ctor: fn(i32) -> PlateField = match key.as_str() {
                    "x" => PlateField::X,
                    "y" => PlateField::Y,
                    "z" => PlateField::Z,
                    "h" => PlateField::Height,
                    "w" => PlateField::Width,
                    "color_id" => |id| PlateField::Color(ColorId::from(id)),
                    _ => return None,
                };
                Some(coerce_int(key, value).map(ctor))
            })
            .collect()
    }

    pub fn apply(&self, plate: &mut Plate) {
        match *self {
            PlateField::X(v) => plate.x = v,
            PlateField::Y(v) => plate.y = v,
            PlateField::Z(v) => plate.z = v,
            PlateField::Height(v) => plate.h = v,
            PlateField::Width(v) => plate.w = v,
            PlateField::Color(id) => plate.color_id = id,
        }
    }

    pub fn apply_new(&self, plate: &mut NewPlate) {
        match *self {
            PlateField::X(v) => plate.x = v,
            PlateField::Y(v) => plate.y = v,
            PlateField::Z(v) => plate.z = v,
            PlateField::Height(v) => plate.h = v,
            PlateField::Width(v) => plate.w = v,
            PlateField::Color(id) => plate.color_id = id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserField {
    Name(String),
}

impl UserField {
    pub fn parse_all(fields: &Map<String, Value>) -> Result<Vec<Self>, FieldError> {
        fields
            .iter()
            .filter_map(|(key, value)| match key.as_str() {
                "name" => Some(coerce_text(key, value).map(UserField::Name)),
                _ => None,
            })
            .collect()
    }

    pub fn apply(&self, user: &mut User) {
        match self {
            UserField::Name(name) => user.name = name.clone(),
        }
    }
}
