use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Creator {
    pub id: Uuid,
    pub name: String,
    pub handle: String,
    pub platform: String,
    /// Display strings such as "120K"; never parsed.
    pub followers: String,
    pub engagement: String,
    pub category: String,
    pub location: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatorCreate {
    /// Client-supplied ids are kept so seeded rosters stay stable; otherwise one is minted.
    pub id: Option<Uuid>,
    pub name: String,
    pub handle: String,
    pub platform: String,
    pub followers: String,
    pub engagement: String,
    pub category: String,
    pub location: String,
    pub description: String,
}

impl CreatorCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("name", &self.name),
            ("handle", &self.handle),
            ("platform", &self.platform),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_handle() {
        let create = CreatorCreate {
            id: None,
            name: "Maya".to_string(),
            handle: "".to_string(),
            platform: "Instagram".to_string(),
            followers: "10K".to_string(),
            engagement: "3%".to_string(),
            category: "Beauty".to_string(),
            location: "Mumbai".to_string(),
            description: "Skincare".to_string(),
        };
        match create.validate() {
            Err(AppError::Validation(msg)) => assert!(msg.contains("handle")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
