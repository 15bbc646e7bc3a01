use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::dto::MealItem;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub items: Json<Vec<MealItem>>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "id, user_id, name, description, items, created_at, updated_at";

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
    let meals = sqlx::query_as::<_, Meal>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM meals
        WHERE user_id = $1
        ORDER BY updated_at DESC
        "#,
    ))
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(meals)
}

pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Meal>> {
    let meal = sqlx::query_as::<_, Meal>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM meals
        WHERE id = $1 AND user_id = $2
        "#,
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(meal)
}

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    description: &str,
    items: Vec<MealItem>,
) -> anyhow::Result<Meal> {
    let meal = sqlx::query_as::<_, Meal>(&format!(
        r#"
        INSERT INTO meals (user_id, name, description, items)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(user_id)
    .bind(name)
    .bind(description)
    .bind(Json(items))
    .fetch_one(db)
    .await?;
    Ok(meal)
}

/// Persists edits and bumps `updated_at`.
pub async fn save(db: &PgPool, meal: &Meal) -> anyhow::Result<Meal> {
    let meal = sqlx::query_as::<_, Meal>(&format!(
        r#"
        UPDATE meals
        SET name = $2, description = $3, items = $4, updated_at = now()
        WHERE id = $1
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(meal.id)
    .bind(&meal.name)
    .bind(&meal.description)
    .bind(&meal.items)
    .fetch_one(db)
    .await?;
    Ok(meal)
}

/// Returns false when the meal does not exist or belongs to someone else.
pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
