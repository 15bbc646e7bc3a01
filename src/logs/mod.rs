mod dto;
pub mod handlers;
pub mod repo;
mod services;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/log", post(handlers::create_log).get(handlers::list_logs))
        .route("/log/summary", get(handlers::summary))
        .route(
            "/log/:id/item/:index",
            put(handlers::update_item).delete(handlers::delete_item),
        )
}
