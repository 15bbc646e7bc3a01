use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::auth::services::AuthUser;
use crate::meals::dto::{
    CreateMealRequest, MealResponse, MealsResponse, UpdateMealRequest,
};
use crate::meals::repo;
use crate::state::AppState;

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// GET /meals — newest edited first.
#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MealsResponse>, (StatusCode, String)> {
    let meals = repo::list_by_user(&state.db, user_id).await.map_err(|e| {
        error!(error = %e, %user_id, "list_meals failed");
        internal(e)
    })?;
    Ok(Json(MealsResponse { meals }))
}

/// POST /meals
#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealResponse>), (StatusCode, String)> {
    let name = payload.name.trim();
    if name.is_empty() {
        warn!(%user_id, "create_meal without a name");
        return Err((StatusCode::BAD_REQUEST, "Meal name is required".into()));
    }
    if payload.items.is_empty() {
        warn!(%user_id, "create_meal without items");
        return Err((
            StatusCode::BAD_REQUEST,
            "At least one item is required".into(),
        ));
    }

    let description = payload
        .description
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let meal = repo::create(&state.db, user_id, name, description, payload.items)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "create_meal failed");
            internal(e)
        })?;

    info!(meal_id = %meal.id, %user_id, "meal created");
    Ok((
        StatusCode::CREATED,
        Json(MealResponse {
            message: "Meal created successfully",
            meal,
        }),
    ))
}

/// PUT /meals/:id
#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMealRequest>,
) -> Result<Json<MealResponse>, (StatusCode, String)> {
    let Some(mut meal) = repo::get(&state.db, user_id, id).await.map_err(internal)? else {
        warn!(%user_id, %id, "update_meal: not found");
        return Err((StatusCode::NOT_FOUND, "Meal not found".into()));
    };

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if !name.is_empty() {
            meal.name = name;
        }
    }
    if let Some(description) = payload.description {
        meal.description = description.trim().to_string();
    }
    if let Some(items) = payload.items {
        if !items.is_empty() {
            meal.items = sqlx::types::Json(items);
        }
    }

    let meal = repo::save(&state.db, &meal).await.map_err(|e| {
        error!(error = %e, %user_id, %id, "update_meal failed");
        internal(e)
    })?;

    Ok(Json(MealResponse {
        message: "Meal updated successfully",
        meal,
    }))
}

/// DELETE /meals/:id
#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let deleted = repo::delete(&state.db, user_id, id).await.map_err(|e| {
        error!(error = %e, %user_id, %id, "delete_meal failed");
        internal(e)
    })?;

    if !deleted {
        warn!(%user_id, %id, "delete_meal: not found");
        return Err((StatusCode::NOT_FOUND, "Meal not found".into()));
    }

    info!(meal_id = %id, %user_id, "meal deleted");
    Ok(Json(
        serde_json::json!({ "message": "Meal deleted successfully" }),
    ))
}
