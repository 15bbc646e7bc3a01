use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, instrument, warn};

use crate::auth::services::AuthUser;
use crate::recipes::dto::{GenerateRequest, GenerateResponse};
use crate::recipes::gemini::RecipeError;
use crate::state::AppState;

/// POST /recipes/generate
#[instrument(skip(state, payload))]
pub async fn generate_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    let ingredient = payload.ingredient.trim();
    if ingredient.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Ingredient is required".into()));
    }

    match state.gemini.generate(ingredient).await {
        Ok(recipes) => Ok(Json(GenerateResponse { recipes })),
        Err(e @ RecipeError::MissingCredentials) => {
            error!(error = %e, "recipe generation misconfigured");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Recipe generation not configured".into(),
            ))
        }
        Err(e) => {
            warn!(error = %e, %user_id, ingredient, "recipe generation failed");
            Err((
                StatusCode::BAD_GATEWAY,
                "Failed to generate recipes".into(),
            ))
        }
    }
}
