use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::goals::services::{ComputedGoals, GoalInputs};

/// Stored goal set plus the inputs that produced it, one row per user.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserGoals {
    pub user_id: Uuid,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub sugar: i32,
    pub weight_kg: f64,
    pub target_weight_kg: Option<f64>,
    pub height_cm: f64,
    pub age: i32,
    pub gender: String,
    pub activity_level: String,
    pub template: String,
    pub weekly_target_kg: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "user_id, calories, protein, carbs, fat, sugar, weight_kg, \
                       target_weight_kg, height_cm, age, gender, activity_level, \
                       template, weekly_target_kg, updated_at";

pub async fn find(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<UserGoals>> {
    let goals = sqlx::query_as::<_, UserGoals>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM user_goals
        WHERE user_id = $1
        "#,
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(goals)
}

pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    goals: ComputedGoals,
    inputs: &GoalInputs,
    target_weight_kg: Option<f64>,
) -> anyhow::Result<UserGoals> {
    let row = sqlx::query_as::<_, UserGoals>(&format!(
        r#"
        INSERT INTO user_goals (user_id, calories, protein, carbs, fat, sugar,
                                weight_kg, target_weight_kg, height_cm, age,
                                gender, activity_level, template, weekly_target_kg)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (user_id) DO UPDATE SET
            calories = EXCLUDED.calories,
            protein = EXCLUDED.protein,
            carbs = EXCLUDED.carbs,
            fat = EXCLUDED.fat,
            sugar = EXCLUDED.sugar,
            weight_kg = EXCLUDED.weight_kg,
            target_weight_kg = EXCLUDED.target_weight_kg,
            height_cm = EXCLUDED.height_cm,
            age = EXCLUDED.age,
            gender = EXCLUDED.gender,
            activity_level = EXCLUDED.activity_level,
            template = EXCLUDED.template,
            weekly_target_kg = EXCLUDED.weekly_target_kg,
            updated_at = now()
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(user_id)
    .bind(goals.calories)
    .bind(goals.protein)
    .bind(goals.carbs)
    .bind(goals.fat)
    .bind(goals.sugar)
    .bind(inputs.weight_kg)
    .bind(target_weight_kg)
    .bind(inputs.height_cm)
    .bind(inputs.age)
    .bind(inputs.gender.as_str())
    .bind(inputs.activity_level.as_str())
    .bind(inputs.template.as_str())
    .bind(inputs.weekly_target_kg)
    .fetch_one(db)
    .await?;
    Ok(row)
}
