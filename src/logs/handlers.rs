use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{error, instrument, warn};
use uuid::Uuid;

use crate::auth::services::AuthUser;
use crate::logs::dto::{CreateLogRequest, ItemMessage, RangeParams, Totals, UpdateLogItem};
use crate::logs::repo::{self, FoodLog};
use crate::logs::services::{apply_update, summarize};
use crate::state::AppState;

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn parse_range(params: &RangeParams) -> Result<Option<(OffsetDateTime, OffsetDateTime)>, (StatusCode, String)> {
    match (&params.start, &params.end) {
        (Some(start), Some(end)) => {
            let start = OffsetDateTime::parse(start, &Rfc3339).map_err(|_| {
                (StatusCode::BAD_REQUEST, "Invalid start date".to_string())
            })?;
            let end = OffsetDateTime::parse(end, &Rfc3339)
                .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid end date".to_string()))?;
            Ok(Some((start, end)))
        }
        _ => Ok(None),
    }
}

/// POST /log
#[instrument(skip(state, payload))]
pub async fn create_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateLogRequest>,
) -> Result<(StatusCode, Json<FoodLog>), (StatusCode, String)> {
    let date = payload.date.unwrap_or_else(OffsetDateTime::now_utc);
    let log = repo::create(
        &state.db,
        user_id,
        date,
        payload.notes.as_deref(),
        payload.items,
    )
    .await
    .map_err(|e| {
        error!(error = %e, %user_id, "create_log failed");
        internal(e)
    })?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /log?start=&end=
#[instrument(skip(state))]
pub async fn list_logs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<FoodLog>>, (StatusCode, String)> {
    let range = parse_range(&params)?;
    let logs = repo::list_range(&state.db, user_id, range)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "list_logs failed");
            internal(e)
        })?;
    Ok(Json(logs))
}

/// GET /log/summary?start=&end=
#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<RangeParams>,
) -> Result<Json<Totals>, (StatusCode, String)> {
    let range = parse_range(&params)?;
    let logs = repo::list_range(&state.db, user_id, range)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "summary failed");
            internal(e)
        })?;
    let totals = summarize(logs.iter().flat_map(|log| log.items.0.iter()));
    Ok(Json(totals))
}

/// PUT /log/:id/item/:index
#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(payload): Json<UpdateLogItem>,
) -> Result<Json<ItemMessage<FoodLog>>, (StatusCode, String)> {
    let Some(mut log) = repo::get(&state.db, user_id, id).await.map_err(internal)? else {
        warn!(%user_id, %id, "log not found");
        return Err((StatusCode::NOT_FOUND, "Log not found".into()));
    };

    let Some(item) = log.items.0.get_mut(index) else {
        return Err((StatusCode::BAD_REQUEST, "Invalid item index".into()));
    };
    apply_update(item, payload);

    repo::save_items(&state.db, id, &log.items.0)
        .await
        .map_err(internal)?;
    Ok(Json(ItemMessage {
        message: "Item updated successfully",
        log: Some(log),
    }))
}

/// DELETE /log/:id/item/:index — removing the last item removes the log.
#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<ItemMessage<FoodLog>>, (StatusCode, String)> {
    let Some(mut log) = repo::get(&state.db, user_id, id).await.map_err(internal)? else {
        warn!(%user_id, %id, "log not found");
        return Err((StatusCode::NOT_FOUND, "Log not found".into()));
    };

    if index >= log.items.0.len() {
        return Err((StatusCode::BAD_REQUEST, "Invalid item index".into()));
    }
    log.items.0.remove(index);

    if log.items.0.is_empty() {
        repo::delete(&state.db, id).await.map_err(internal)?;
        return Ok(Json(ItemMessage {
            message: "Item and log deleted successfully",
            log: None,
        }));
    }

    repo::save_items(&state.db, id, &log.items.0)
        .await
        .map_err(internal)?;
    Ok(Json(ItemMessage {
        message: "Item deleted successfully",
        log: Some(log),
    }))
}
