//! Entities mirrored read-only from the inventory backend.

pub mod ingredient;
pub mod production;
pub mod recipe;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a display-only text field without rejecting the record: `null`
/// becomes empty and other JSON values keep their JSON text.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
