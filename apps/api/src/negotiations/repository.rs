use sqlx::PgPool;
use uuid::Uuid;

use crate::models::negotiation::{NegotiationRow, Sender};

pub struct NewNegotiation<'a> {
    pub campaign_id: Uuid,
    pub creator_id: Uuid,
    pub message: &'a str,
    pub sender: Sender,
    pub ai_response: &'a str,
    pub audio_url: Option<&'a str>,
}

pub async fn insert_negotiation(
    pool: &PgPool,
    new: &NewNegotiation<'_>,
) -> Result<NegotiationRow, sqlx::Error> {
    sqlx::query_as::<_, NegotiationRow>(
        r#"
        INSERT INTO negotiations (id, campaign_id, creator_id, message, sender, ai_response, audio_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.campaign_id)
    .bind(new.creator_id)
    .bind(new.message)
    .bind(new.sender.as_str())
    .bind(new.ai_response)
    .bind(new.audio_url)
    .fetch_one(pool)
    .await
}

/// Full conversation for a pair, oldest first.
pub async fn negotiation_history(
    pool: &PgPool,
    campaign_id: Uuid,
    creator_id: Uuid,
) -> Result<Vec<NegotiationRow>, sqlx::Error> {
    sqlx::query_as::<_, NegotiationRow>(
        r#"
        SELECT * FROM negotiations
        WHERE campaign_id = $1 AND creator_id = $2
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(campaign_id)
    .bind(creator_id)
    .fetch_all(pool)
    .await
}
