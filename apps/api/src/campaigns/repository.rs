use sqlx::PgPool;
use uuid::Uuid;

use crate::models::campaign::{Campaign, CampaignCreate};

pub async fn insert_campaign(pool: &PgPool, new: &CampaignCreate) -> Result<Campaign, sqlx::Error> {
    let platforms: Vec<String> = new
        .platforms
        .iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    sqlx::query_as::<_, Campaign>(
        r#"
        INSERT INTO campaigns (id, title, brief, platforms, audience, budget)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.title.trim())
    .bind(&new.brief)
    .bind(&platforms)
    .bind(&new.audience)
    .bind(&new.budget)
    .fetch_one(pool)
    .await
}

pub async fn get_campaign(pool: &PgPool, id: Uuid) -> Result<Option<Campaign>, sqlx::Error> {
    sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_campaigns(pool: &PgPool) -> Result<Vec<Campaign>, sqlx::Error> {
    sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Sets `enhanced_brief` only if it has never been set. Returns the stored value,
/// which is the earlier one if another request won the race.
pub async fn set_enhanced_brief_once(
    pool: &PgPool,
    id: Uuid,
    enhanced_brief: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<String>>(
        r#"
        UPDATE campaigns
        SET enhanced_brief = COALESCE(enhanced_brief, $2)
        WHERE id = $1
        RETURNING enhanced_brief
        "#,
    )
    .bind(id)
    .bind(enhanced_brief)
    .fetch_optional(pool)
    .await
    .map(Option::flatten)
}

/// Returns true if a row was deleted.
pub async fn delete_campaign(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
