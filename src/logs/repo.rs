use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::logs::dto::LogItem;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FoodLog {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub notes: Option<String>,
    pub items: Json<Vec<LogItem>>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, user_id, date, notes, items, created_at";

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    date: OffsetDateTime,
    notes: Option<&str>,
    items: Vec<LogItem>,
) -> anyhow::Result<FoodLog> {
    let log = sqlx::query_as::<_, FoodLog>(&format!(
        r#"
        INSERT INTO food_logs (user_id, date, notes, items)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(user_id)
    .bind(date)
    .bind(notes)
    .bind(Json(items))
    .fetch_one(db)
    .await?;
    Ok(log)
}

pub async fn list_range(
    db: &PgPool,
    user_id: Uuid,
    range: Option<(OffsetDateTime, OffsetDateTime)>,
) -> anyhow::Result<Vec<FoodLog>> {
    let logs = match range {
        Some((start, end)) => {
            sqlx::query_as::<_, FoodLog>(&format!(
                r#"
                SELECT {COLUMNS}
                FROM food_logs
                WHERE user_id = $1 AND date >= $2 AND date <= $3
                ORDER BY date DESC
                "#,
            ))
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, FoodLog>(&format!(
                r#"
                SELECT {COLUMNS}
                FROM food_logs
                WHERE user_id = $1
                ORDER BY date DESC
                "#,
            ))
            .bind(user_id)
            .fetch_all(db)
            .await?
        }
    };
    Ok(logs)
}

pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<FoodLog>> {
    let log = sqlx::query_as::<_, FoodLog>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM food_logs
        WHERE id = $1 AND user_id = $2
        "#,
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn save_items(db: &PgPool, id: Uuid, items: &[LogItem]) -> anyhow::Result<()> {
    sqlx::query("UPDATE food_logs SET items = $2 WHERE id = $1")
        .bind(id)
        .bind(Json(items))
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM food_logs WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}
