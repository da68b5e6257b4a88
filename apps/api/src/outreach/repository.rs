use sqlx::PgPool;
use uuid::Uuid;

use crate::models::outreach::OutreachRow;

pub async fn insert_outreach(
    pool: &PgPool,
    campaign_id: Uuid,
    creator_id: Uuid,
    outreach_text: &str,
    audio_url: Option<&str>,
) -> Result<OutreachRow, sqlx::Error> {
    sqlx::query_as::<_, OutreachRow>(
        r#"
        INSERT INTO outreach (id, campaign_id, creator_id, outreach_text, audio_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(campaign_id)
    .bind(creator_id)
    .bind(outreach_text)
    .bind(audio_url)
    .fetch_one(pool)
    .await
}

/// Most recent outreach for a pair.
pub async fn latest_outreach(
    pool: &PgPool,
    campaign_id: Uuid,
    creator_id: Uuid,
) -> Result<Option<OutreachRow>, sqlx::Error> {
    sqlx::query_as::<_, OutreachRow>(
        r#"
        SELECT * FROM outreach
        WHERE campaign_id = $1 AND creator_id = $2
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(campaign_id)
    .bind(creator_id)
    .fetch_optional(pool)
    .await
}

pub async fn outreach_for_campaign(
    pool: &PgPool,
    campaign_id: Uuid,
) -> Result<Vec<OutreachRow>, sqlx::Error> {
    sqlx::query_as::<_, OutreachRow>(
        "SELECT * FROM outreach WHERE campaign_id = $1 ORDER BY created_at DESC",
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}
