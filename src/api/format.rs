use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use crate::database::models::{Color, ModuleRecord, PlateRecord, User};
use crate::services::{ModuleDetail, UserProfile};
use crate::types::{ModuleId, UserId};

pub const API_PREFIX: &str = "/api/v1";

pub fn module_href(id: ModuleId) -> String {
    format!("{}/modules/{}/", API_PREFIX, id)
}

pub fn user_href(id: UserId) -> String {
    format!("{}/users/{}/", API_PREFIX, id)
}

/// RFC 3339 with a numeric offset, e.g. `2024-03-01T10:00:00+00:00`
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn author_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "name": user.name,
        "href": user_href(user.id),
    })
}

/// Summary used in module listings and user profiles
pub fn module_summary_json(record: &ModuleRecord) -> Value {
    let module = &record.module;
    json!({
        "id": module.id,
        "href": module_href(module.id),
        "name": module.name,
        "created": timestamp(&module.created_at),
        "author": author_json(&record.author),
    })
}

/// Full module: summary plus `public`, and `w`, `h`, `plates` when present
pub fn module_json(detail: &ModuleDetail) -> Value {
    let mut value = module_summary_json(&detail.record);
    let module = &detail.record.module;

    if let Value::Object(map) = &mut value {
        map.insert("public".into(), Value::Bool(module.public));
        if let Some(w) = module.w {
            map.insert("w".into(), json!(w));
        }
        if let Some(h) = module.h {
            map.insert("h".into(), json!(h));
        }
        if !detail.plates.is_empty() {
            map.insert("plates".into(), plates_json(&detail.plates));
        }
    }
    value
}

pub fn color_json(color: &Color) -> Value {
    json!({
        "id": color.id,
        "name": color.name,
        "hex": color.hex,
    })
}

pub fn plate_json(record: &PlateRecord) -> Value {
    let plate = &record.plate;
    json!({
        "id": plate.id,
        "x": plate.x,
        "y": plate.y,
        "z": plate.z,
        "h": plate.h,
        "w": plate.w,
        "color": color_json(&record.color),
    })
}

pub fn plates_json(plates: &[PlateRecord]) -> Value {
    Value::Array(plates.iter().map(plate_json).collect())
}

pub fn modules_json(modules: &[ModuleRecord]) -> Value {
    Value::Array(modules.iter().map(module_summary_json).collect())
}

pub fn user_json(profile: &UserProfile) -> Value {
    let mut map = Map::new();
    map.insert("id".into(), json!(profile.user.id));
    map.insert("name".into(), json!(profile.user.name));
    map.insert("href".into(), json!(user_href(profile.user.id)));
    map.insert("modules".into(), modules_json(&profile.modules));
    // no layout resource here; clients still read the key
    map.insert("layouts".into(), json!([]));
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Module, Plate};
    use chrono::TimeZone;

    fn author() -> User {
        User {
            id: 3,
            name: "Annie Doe".into(),
            email: "annie@test.test".into(),
        }
    }

    fn record(w: Option<i32>) -> ModuleRecord {
        ModuleRecord {
            module: Module {
                id: 7,
                name: "Hall".into(),
                w,
                h: None,
                public: true,
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
                user_id: 3,
            },
            author: author(),
        }
    }

    fn plate() -> PlateRecord {
        PlateRecord {
            plate: Plate {
                id: 11,
                module_id: 7,
                x: 1,
                y: 2,
                z: 3,
                h: 4,
                w: 5,
                color_id: 2,
            },
            color: Color {
                id: 2,
                name: "Red".into(),
                hex: "#ff0000".into(),
            },
        }
    }

    #[test]
    fn summary_has_links_and_no_detail_fields() {
        let value = module_summary_json(&record(Some(10)));
        assert_eq!(
            value,
            json!({
                "id": 7,
                "href": "/api/v1/modules/7/",
                "name": "Hall",
                "created": "2024-03-01T10:00:00+00:00",
                "author": { "id": 3, "name": "Annie Doe", "href": "/api/v1/users/3/" },
            })
        );
    }

    #[test]
    fn detail_includes_optional_fields_only_when_set() {
        let bare = module_json(&ModuleDetail {
            record: record(None),
            plates: vec![],
        });
        assert_eq!(bare["public"], true);
        assert!(bare.get("w").is_none());
        assert!(bare.get("h").is_none());
        assert!(bare.get("plates").is_none());

        let full = module_json(&ModuleDetail {
            record: record(Some(50)),
            plates: vec![plate()],
        });
        assert_eq!(full["w"], 50);
        assert_eq!(full["plates"][0]["color"]["hex"], "#ff0000");
    }

    #[test]
    fn plate_expands_color() {
        assert_eq!(
            plate_json(&plate()),
            json!({
                "id": 11, "x": 1, "y": 2, "z": 3, "h": 4, "w": 5,
                "color": { "id": 2, "name": "Red", "hex": "#ff0000" },
            })
        );
    }

    #[test]
    fn user_lists_module_summaries() {
        let value = user_json(&UserProfile {
            user: author(),
            modules: vec![record(None)],
        });
        assert_eq!(value["href"], "/api/v1/users/3/");
        assert_eq!(value["modules"][0]["href"], "/api/v1/modules/7/");
        assert_eq!(value["layouts"], json!([]));
        assert!(value.get("email").is_none());
    }
}
