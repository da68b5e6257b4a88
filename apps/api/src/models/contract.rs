use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContractRow {
    pub id: Uuid,
    pub deal_id: Uuid,
    pub contract_text: String,
    pub pdf_url: String,
    pub created_at: DateTime<Utc>,
}
