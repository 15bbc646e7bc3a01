//! Recipe-idea generation against the Gemini generateContent API. The model
//! is asked for strict JSON; the response is defensively stripped of code
//! fences before parsing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GeminiConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_RECIPES: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("gemini API key not configured")]
    MissingCredentials,

    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("could not parse recipes from model output")]
    Malformed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIdea {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub cook_time: String,
    pub servings: String,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

fn prompt(ingredient: &str) -> String {
    format!(
        r#"Generate exactly 4 creative and practical recipe ideas using "{ingredient}" as a main ingredient.

For each recipe, provide:
- A catchy, specific title
- A brief description (2-3 sentences explaining what makes it special)
- Difficulty level (must be exactly: "Easy", "Medium", or "Hard")
- Cook time in minutes (e.g., "30 min")
- Number of servings (e.g., "4 servings")

Format your response as a JSON array with this exact structure:
[
  {{
    "title": "Recipe Name",
    "description": "Brief description of the recipe",
    "difficulty": "Easy",
    "cookTime": "30 min",
    "servings": "4 servings"
  }}
]

Return ONLY valid JSON, no additional text."#
    )
}

/// Drops markdown code fences the model sometimes wraps its JSON in.
fn extract_json(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub async fn generate(&self, ingredient: &str) -> Result<Vec<RecipeIdea>, RecipeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(RecipeError::MissingCredentials)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let text = prompt(ingredient);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &text }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecipeError::Status(status));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let output = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(RecipeError::Malformed)?;

        let mut recipes: Vec<RecipeIdea> =
            serde_json::from_str(&extract_json(&output)).map_err(|_| RecipeError::Malformed)?;
        if recipes.is_empty() {
            return Err(RecipeError::Malformed);
        }
        recipes.truncate(MAX_RECIPES);
        debug!(count = recipes.len(), %ingredient, "recipes generated");
        Ok(recipes)
    }
}
