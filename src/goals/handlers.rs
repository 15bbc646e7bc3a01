use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, info, instrument, warn};

use crate::auth::services::AuthUser;
use crate::goals::dto::PutGoalsRequest;
use crate::goals::repo::{self, UserGoals};
use crate::goals::services::{compute_goals, GoalInputs};
use crate::state::AppState;

/// GET /goals
#[instrument(skip(state))]
pub async fn get_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserGoals>, (StatusCode, String)> {
    match repo::find(&state.db, user_id).await {
        Ok(Some(goals)) => Ok(Json(goals)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Goals not set".into())),
        Err(e) => {
            error!(error = %e, %user_id, "get_goals failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// PUT /goals — recompute from the submitted profile and store the result.
#[instrument(skip(state, payload))]
pub async fn put_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<PutGoalsRequest>,
) -> Result<Json<UserGoals>, (StatusCode, String)> {
    if payload.weight <= 0.0 || payload.height <= 0.0 || payload.age <= 0 {
        warn!(%user_id, "put_goals with non-positive profile values");
        return Err((
            StatusCode::BAD_REQUEST,
            "Weight, height and age are required".into(),
        ));
    }

    let inputs = GoalInputs {
        weight_kg: payload.weight,
        height_cm: payload.height,
        age: payload.age,
        gender: payload.gender,
        activity_level: payload.activity_level,
        template: payload.template,
        weekly_target_kg: payload.weekly_target,
    };
    let goals = compute_goals(&inputs);

    let stored = repo::upsert(&state.db, user_id, goals, &inputs, payload.target_weight)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "put_goals failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    info!(%user_id, calories = goals.calories, "goals updated");
    Ok(Json(stored))
}
