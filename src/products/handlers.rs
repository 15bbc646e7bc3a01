use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, instrument, warn};

use crate::auth::services::AuthUser;
use crate::products::dto::{LookupResponse, SearchParams, SearchResponse};
use crate::products::lookup::LookupError;
use crate::search::aggregate::{SearchError, MIN_QUERY_LEN};
use crate::state::AppState;

/// GET /product/search?query=
///
/// Both providers down is not an error status: the client gets an empty
/// result set plus the per-provider failures and may retry.
#[instrument(skip(state))]
pub async fn search_products(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    if params.query.trim().chars().count() < MIN_QUERY_LEN {
        return Ok(Json(SearchResponse::too_short()));
    }

    match state.search.search(&params.query).await {
        Ok(hits) => Ok(Json(SearchResponse::from_hits(hits))),
        Err(SearchError::AllProvidersFailed(failures)) => {
            warn!(failures = failures.len(), query = %params.query, "search unavailable");
            Ok(Json(SearchResponse::unavailable(failures)))
        }
    }
}

/// GET /product/:barcode
#[instrument(skip(state))]
pub async fn lookup_barcode(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(barcode): Path<String>,
) -> Result<Json<LookupResponse>, (StatusCode, String)> {
    match state.products.lookup(&barcode).await {
        Ok(found) => Ok(Json(found.into())),
        Err(LookupError::NotFound) => {
            Err((StatusCode::NOT_FOUND, "Product not found".into()))
        }
        Err(LookupError::Upstream(e)) => {
            error!(error = %e, %barcode, "barcode lookup upstream failure");
            Err((StatusCode::BAD_GATEWAY, "Product lookup failed".into()))
        }
        Err(LookupError::Db(e)) => {
            error!(error = %e, %barcode, "barcode lookup store failure");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
