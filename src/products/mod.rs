mod dto;
pub mod handlers;
pub mod lookup;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/product/search", get(handlers::search_products))
        .route("/product/:barcode", get(handlers::lookup_barcode))
}
