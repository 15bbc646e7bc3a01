use serde::{Deserialize, Serialize};

use crate::meals::repo::Meal;

/// One component of a reusable meal. Nutrients default to 0 and the serving
/// multiplier to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealItem {
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub sugar: f64,
    #[serde(default = "default_serving_size")]
    pub serving_size: f64,
}

fn default_serving_size() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<MealItem>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMealRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub items: Option<Vec<MealItem>>,
}

#[derive(Debug, Serialize)]
pub struct MealsResponse {
    pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub message: &'static str,
    pub meal: Meal,
}
