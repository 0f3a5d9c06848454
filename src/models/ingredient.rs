//! Ingredient stock record mirrored from the inventory backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub unit: String,
    pub stock: f64,
    pub threshold: f64,
}

impl Ingredient {
    /// True when stock has fallen strictly below the restock threshold.
    pub fn is_below_threshold(&self) -> bool {
        self.stock < self.threshold
    }

    /// Fraction of the threshold currently in stock.
    ///
    /// Not guarded against a zero threshold: IEEE division yields an infinity,
    /// or NaN for `0 / 0` (which never passes `is_below_threshold`).
    pub fn stock_ratio(&self) -> f64 {
        self.stock / self.threshold
    }
}
