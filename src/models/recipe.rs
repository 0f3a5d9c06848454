//! Recipe definition mirrored from the inventory backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub name: String,
    /// Ingredient lines. Their shape belongs to the recipes section; the
    /// dashboard only counts them.
    #[serde(default)]
    pub ingredients: Vec<serde_json::Value>,
}

impl Recipe {
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }
}
