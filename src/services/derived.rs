//! Pure projections over a dashboard snapshot.
//!
//! Nothing here performs I/O or keeps state: the same inputs always produce the
//! same outputs, so the dashboard view can be rebuilt from any snapshot.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::ingredient::Ingredient;
use crate::models::production::ProductionLogEntry;
use crate::models::recipe::Recipe;

/// Number of low-stock alerts shown on the dashboard.
pub const LOW_STOCK_LIMIT: usize = 3;

/// Ingredient below its restock threshold.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LowStockAlert {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub stock: f64,
    pub threshold: f64,
    /// `stock / threshold`, also the gauge fill fraction.
    pub ratio: f64,
}

impl From<&Ingredient> for LowStockAlert {
    fn from(i: &Ingredient) -> Self {
        Self {
            id: i.id.clone(),
            name: i.name.clone(),
            unit: i.unit.clone(),
            stock: i.stock,
            threshold: i.threshold,
            ratio: i.stock_ratio(),
        }
    }
}

/// Total units produced for one recipe.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecipeProductionTotal {
    pub name: String,
    pub production: f64,
}

/// Headline counts for the stats strip.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub ingredient_count: usize,
    pub low_stock_count: usize,
    pub recipe_count: usize,
    pub production_log_count: usize,
    pub total_units_produced: f64,
}

/// The most depleted ingredients, most critical first, at most three.
pub fn compute_low_stock(ingredients: &[Ingredient]) -> Vec<LowStockAlert> {
    let mut below: Vec<&Ingredient> = ingredients
        .iter()
        .filter(|i| i.is_below_threshold())
        .collect();

    // Stable: equal ratios (including -0.0 vs 0.0) keep feed order. NaN
    // cannot pass the filter above.
    below.sort_by(|a, b| {
        a.stock_ratio()
            .partial_cmp(&b.stock_ratio())
            .unwrap_or(Ordering::Equal)
    });

    below
        .into_iter()
        .take(LOW_STOCK_LIMIT)
        .map(LowStockAlert::from)
        .collect()
}

/// Produced quantity per recipe, in recipe order, omitting recipes that
/// produced nothing.
pub fn compute_recipe_production(
    recipes: &[Recipe],
    logs: &[ProductionLogEntry],
) -> Vec<RecipeProductionTotal> {
    recipes
        .iter()
        .map(|recipe| RecipeProductionTotal {
            name: recipe.name.clone(),
            production: logs
                .iter()
                .filter(|log| log.recipe_id == recipe.id)
                .map(|log| log.quantity)
                .sum(),
        })
        .filter(|total| total.production > 0.0)
        .collect()
}

pub fn summarize(
    ingredients: &[Ingredient],
    recipes: &[Recipe],
    logs: &[ProductionLogEntry],
) -> DashboardSummary {
    DashboardSummary {
        ingredient_count: ingredients.len(),
        low_stock_count: ingredients.iter().filter(|i| i.is_below_threshold()).count(),
        recipe_count: recipes.len(),
        production_log_count: logs.len(),
        total_units_produced: logs.iter().map(|log| log.quantity).sum(),
    }
}
