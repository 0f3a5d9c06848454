//! Dashboard loading and view assembly.
//!
//! [`load`] fetches the three backend feeds concurrently and isolates their
//! failures from one another; [`build_view`] turns the resulting snapshot into
//! the screen model returned to the frontend.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::ingredient::Ingredient;
use crate::models::production::ProductionLogEntry;
use crate::models::recipe::Recipe;
use crate::services::derived::{
    self, DashboardSummary, LowStockAlert, RecipeProductionTotal,
};
use crate::services::upstream::UpstreamClient;

/// Number of recipes shown on the quick-access card.
pub const RECIPE_CARD_LIMIT: usize = 3;

pub const NO_PRODUCTION_MESSAGE: &str = "No production data yet";
pub const NO_LOW_STOCK_MESSAGE: &str = "No ingredients below threshold";

/// How a single feed fared during a load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeedOutcome {
    /// Response was a sequence; `count` entries were kept.
    Loaded { count: usize, skipped: usize },
    /// Response arrived but was not a sequence.
    Malformed,
    /// Request failed outright.
    Failed { reason: String },
}

/// Per-feed outcomes of one load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedReport {
    pub ingredients: FeedOutcome,
    pub recipes: FeedOutcome,
    pub production: FeedOutcome,
}

/// The three feeds as read for one request.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
    pub production_logs: Vec<ProductionLogEntry>,
    pub feeds: FeedReport,
}

/// Production bar chart data.
#[derive(Debug, Serialize)]
pub struct ProductionChart {
    pub series: Vec<RecipeProductionTotal>,
    pub empty_message: Option<&'static str>,
}

/// Low stock alert card.
#[derive(Debug, Serialize)]
pub struct LowStockCard {
    pub alerts: Vec<LowStockAlert>,
    pub empty_message: Option<&'static str>,
}

/// Recipe tile on the quick-access card.
#[derive(Debug, Serialize, PartialEq)]
pub struct RecipeCard {
    pub id: String,
    pub name: String,
    pub ingredient_count: usize,
}

/// Suggested supplier order on the ordering card.
#[derive(Debug, Serialize)]
pub struct RecommendedOrder {
    pub title: &'static str,
    pub description: &'static str,
    pub price: &'static str,
}

/// Link to another section of the application.
#[derive(Debug, Serialize)]
pub struct NavigationCard {
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
    pub route: &'static str,
}

/// Everything the dashboard screen renders.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub summary: DashboardSummary,
    pub production: ProductionChart,
    pub low_stock: LowStockCard,
    pub recipes: Vec<RecipeCard>,
    pub recommended_orders: Vec<RecommendedOrder>,
    pub navigation: Vec<NavigationCard>,
}

/// Fetch all three feeds concurrently on behalf of `token`.
///
/// Never fails: each feed degrades to an empty list on its own, and the
/// outcome is recorded in [`DashboardSnapshot::feeds`].
pub async fn load(client: &UpstreamClient, token: &str) -> DashboardSnapshot {
    let (ingredients, recipes, production) = tokio::join!(
        client.ingredients(token),
        client.recipes(token),
        client.production_logs(token),
    );

    let (ingredients, ingredients_outcome) = read_feed::<Ingredient>("ingredients", ingredients);
    let (recipes, recipes_outcome) = read_feed::<Recipe>("recipes", recipes);
    let (production_logs, production_outcome) =
        read_feed::<ProductionLogEntry>("production", production);

    tracing::debug!(
        ingredients = ingredients.len(),
        recipes = recipes.len(),
        production_logs = production_logs.len(),
        "Dashboard feeds loaded"
    );

    DashboardSnapshot {
        ingredients,
        recipes,
        production_logs,
        feeds: FeedReport {
            ingredients: ingredients_outcome,
            recipes: recipes_outcome,
            production: production_outcome,
        },
    }
}

/// Validate one feed response, falling back to an empty list.
pub fn read_feed<T: DeserializeOwned>(
    feed: &'static str,
    response: Result<Value, AppError>,
) -> (Vec<T>, FeedOutcome) {
    let body = match response {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(feed, error = %e, "Failed to load dashboard feed");
            return (
                Vec::new(),
                FeedOutcome::Failed {
                    reason: e.to_string(),
                },
            );
        }
    };

    let entries = match body {
        Value::Array(entries) => entries,
        other => {
            tracing::warn!(feed, response = %other, "Feed response is not an array");
            return (Vec::new(), FeedOutcome::Malformed);
        }
    };

    let total = entries.len();
    let items: Vec<T> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<T>(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(feed, index, error = %e, "Skipping unreadable feed entry");
                None
            }
        })
        .collect();

    let count = items.len();
    (
        items,
        FeedOutcome::Loaded {
            count,
            skipped: total - count,
        },
    )
}

/// Assemble the screen model from a snapshot.
pub fn build_view(snapshot: &DashboardSnapshot) -> DashboardView {
    let series =
        derived::compute_recipe_production(&snapshot.recipes, &snapshot.production_logs);
    let alerts = derived::compute_low_stock(&snapshot.ingredients);

    DashboardView {
        summary: derived::summarize(
            &snapshot.ingredients,
            &snapshot.recipes,
            &snapshot.production_logs,
        ),
        production: ProductionChart {
            empty_message: series.is_empty().then_some(NO_PRODUCTION_MESSAGE),
            series,
        },
        low_stock: LowStockCard {
            empty_message: alerts.is_empty().then_some(NO_LOW_STOCK_MESSAGE),
            alerts,
        },
        recipes: snapshot
            .recipes
            .iter()
            .take(RECIPE_CARD_LIMIT)
            .map(|r| RecipeCard {
                id: r.id.clone(),
                name: r.name.clone(),
                ingredient_count: r.ingredient_count(),
            })
            .collect(),
        recommended_orders: vec![RecommendedOrder {
            title: "Weekly Order Bundle",
            description: "5 ingredients from preferred suppliers",
            price: "$345.00",
        }],
        navigation: navigation_cards(),
    }
}

fn navigation_cards() -> Vec<NavigationCard> {
    vec![
        NavigationCard {
            title: "Low Stock Alert",
            description: "Items that need restocking soon",
            action: "View All Ingredients",
            route: "/inventory",
        },
        NavigationCard {
            title: "Recipe Management",
            description: "Quick access to recipes",
            action: "Manage Recipes",
            route: "/recipes",
        },
        NavigationCard {
            title: "Ordering",
            description: "Order ingredients from suppliers",
            action: "Go to Ordering",
            route: "/ordering",
        },
    ]
}
