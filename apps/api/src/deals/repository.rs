use sqlx::PgPool;
use uuid::Uuid;

use crate::models::deal::{DealRequest, DealRow, STATUS_FINALIZED};

pub async fn insert_deal(pool: &PgPool, req: &DealRequest) -> Result<DealRow, sqlx::Error> {
    sqlx::query_as::<_, DealRow>(
        r#"
        INSERT INTO deals (id, campaign_id, creator_id, rate, deliverables, platform, timeline, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.campaign_id)
    .bind(req.creator_id)
    .bind(req.rate.trim())
    .bind(req.deliverables.trim())
    .bind(req.platform.trim())
    .bind(req.timeline.trim())
    .bind(STATUS_FINALIZED)
    .fetch_one(pool)
    .await
}

pub async fn get_deal(pool: &PgPool, id: Uuid) -> Result<Option<DealRow>, sqlx::Error> {
    sqlx::query_as::<_, DealRow>("SELECT * FROM deals WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_deals(pool: &PgPool) -> Result<Vec<DealRow>, sqlx::Error> {
    sqlx::query_as::<_, DealRow>("SELECT * FROM deals ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Returns true if a row was deleted.
pub async fn delete_deal(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM deals WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
