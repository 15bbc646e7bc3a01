mod dto;
pub mod handlers;
pub mod repo;

use axum::routing::{get, put};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meals", get(handlers::list_meals).post(handlers::create_meal))
        .route(
            "/meals/:id",
            put(handlers::update_meal).delete(handlers::delete_meal),
        )
}
