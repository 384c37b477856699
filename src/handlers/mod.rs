pub mod arithmetic;
pub mod exercises;
pub mod health;
pub mod progress;
pub mod routines;
pub mod sessions;
pub mod stats;
pub mod users;
pub mod utility;

use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Body returned by every single-record delete:
/// `{"message": "<Entity> <id> deleted successfully", "deleted_<key>": <record>}`.
pub(crate) fn deleted<T: Serialize>(
    entity: &str,
    key: &str,
    id: i64,
    record: &T,
) -> Result<Json<Value>> {
    let mut body = Map::new();
    body.insert(
        "message".to_string(),
        Value::String(format!("{} {} deleted successfully", entity, id)),
    );
    body.insert(format!("deleted_{}", key), serde_json::to_value(record)?);
    Ok(Json(Value::Object(body)))
}
