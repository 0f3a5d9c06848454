//! Production log entry mirrored from the inventory backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLogEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub date: String,
    pub recipe_id: String,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Value>,
    /// Supervisor id, or the populated user document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<Value>,
}
