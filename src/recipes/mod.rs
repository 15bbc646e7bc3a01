mod dto;
pub mod gemini;
pub mod handlers;

use axum::routing::post;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/recipes/generate", post(handlers::generate_recipes))
}
