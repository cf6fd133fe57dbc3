//! Shape checks for decoded status API payloads.

use serde::Deserialize;
use serde_json::Value;

use herald_common::types::WorkItemRecord;

use crate::error::ShapeError;

/// Key holding the list of homework records.
pub const HOMEWORKS_KEY: &str = "homeworks";

/// Key holding the server-side timestamp to use as the next cursor.
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Check the payload shape and return the `homeworks` entries verbatim, in
/// upstream order.
///
/// Only the top-level shape is checked here. Entries are parsed one at a time
/// with [`parse_record`], so a malformed older entry never hides the newest one.
/// An empty list is valid and means nothing changed since the cursor.
pub fn validate(payload: &Value) -> Result<Vec<Value>, ShapeError> {
    let object = payload.as_object().ok_or(ShapeError::NotAnObject)?;
    if object.is_empty() {
        return Err(ShapeError::Empty);
    }

    let homeworks = match object.get(HOMEWORKS_KEY) {
        None | Some(Value::Null) => return Err(ShapeError::MissingField(HOMEWORKS_KEY)),
        Some(value) => value,
    };

    let items = homeworks.as_array().ok_or(ShapeError::WrongType {
        found: json_type(homeworks),
    })?;

    Ok(items.clone())
}

/// Parse the entry at `index` of a validated `homeworks` list.
pub fn parse_record(index: usize, item: &Value) -> Result<WorkItemRecord, ShapeError> {
    WorkItemRecord::deserialize(item).map_err(|e| ShapeError::InvalidRecord {
        index,
        reason: e.to_string(),
    })
}

/// Server timestamp reported alongside the records, if any.
pub fn current_date(payload: &Value) -> Option<i64> {
    payload.get(CURRENT_DATE_KEY)?.as_i64()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
