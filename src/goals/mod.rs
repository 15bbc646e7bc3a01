mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/goals",
        get(handlers::get_goals).put(handlers::put_goals),
    )
}
