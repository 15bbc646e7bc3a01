use serde::{Deserialize, Serialize};

use crate::recipes::gemini::RecipeIdea;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub ingredient: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub recipes: Vec<RecipeIdea>,
}
