use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

pub const STATUS_FINALIZED: &str = "finalized";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DealRow {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub creator_id: Uuid,
    pub rate: String,
    pub deliverables: String,
    pub platform: String,
    pub timeline: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DealRequest {
    pub campaign_id: Uuid,
    pub creator_id: Uuid,
    #[serde(alias = "final_rate")]
    pub rate: String,
    pub deliverables: String,
    pub platform: String,
    pub timeline: String,
}

impl DealRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("rate", &self.rate),
            ("deliverables", &self.deliverables),
            ("platform", &self.platform),
            ("timeline", &self.timeline),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }
}
