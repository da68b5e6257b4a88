use sqlx::PgPool;
use uuid::Uuid;

use crate::models::creator::{Creator, CreatorCreate};

/// Optional case-insensitive substring filters for the roster listing.
#[derive(Debug, Default, Clone)]
pub struct CreatorFilter {
    pub category: Option<String>,
    pub platform: Option<String>,
}

/// Lists creators in storage order (insertion time, then id). Ranking ties
/// resolve against this order, so it must stay stable.
pub async fn list_creators(pool: &PgPool, filter: &CreatorFilter) -> Result<Vec<Creator>, sqlx::Error> {
    sqlx::query_as::<_, Creator>(
        r#"
        SELECT * FROM creators
        WHERE ($1::text IS NULL OR category ILIKE $1)
          AND ($2::text IS NULL OR platform ILIKE $2)
        ORDER BY created_at, id
        "#,
    )
    .bind(filter.category.as_deref().map(contains_pattern))
    .bind(filter.platform.as_deref().map(contains_pattern))
    .fetch_all(pool)
    .await
}

pub async fn get_creator(pool: &PgPool, id: Uuid) -> Result<Option<Creator>, sqlx::Error> {
    sqlx::query_as::<_, Creator>("SELECT * FROM creators WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_creator(pool: &PgPool, new: &CreatorCreate) -> Result<Creator, sqlx::Error> {
    sqlx::query_as::<_, Creator>(
        r#"
        INSERT INTO creators
            (id, name, handle, platform, followers, engagement, category, location, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(new.id.unwrap_or_else(Uuid::new_v4))
    .bind(new.name.trim())
    .bind(new.handle.trim())
    .bind(new.platform.trim())
    .bind(&new.followers)
    .bind(&new.engagement)
    .bind(&new.category)
    .bind(&new.location)
    .bind(&new.description)
    .fetch_one(pool)
    .await
}

pub async fn count_creators(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM creators")
        .fetch_one(pool)
        .await
}

/// Returns true if a row was deleted.
pub async fn delete_creator(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM creators WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `%needle%` with LIKE metacharacters in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
