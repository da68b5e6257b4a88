use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Campaign {
    pub id: Uuid,
    pub title: String,
    pub brief: String,
    pub enhanced_brief: Option<String>,
    pub platforms: Vec<String>,
    pub audience: String,
    pub budget: String,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// The enhanced brief once it exists, the client's original brief before that.
    pub fn effective_brief(&self) -> &str {
        self.enhanced_brief.as_deref().unwrap_or(&self.brief)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignCreate {
    pub title: String,
    pub brief: String,
    pub platforms: Vec<String>,
    pub audience: String,
    pub budget: String,
}

impl CampaignCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        if self.brief.trim().is_empty() {
            return Err(AppError::Validation("brief cannot be empty".to_string()));
        }
        if self.platforms.iter().all(|p| p.trim().is_empty()) {
            return Err(AppError::Validation(
                "platforms must name at least one platform".to_string(),
            ));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str, brief: &str, platforms: &[&str]) -> CampaignCreate {
        CampaignCreate {
            title: title.to_string(),
            brief: brief.to_string(),
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
            audience: "Gen Z".to_string(),
            budget: "10000".to_string(),
        }
    }

    #[test]
    fn test_effective_brief_prefers_enhanced() {
        let mut campaign = fixtures::campaign("Launch", "plain", "everyone", &["Instagram"]);
        assert_eq!(campaign.effective_brief(), "plain");
        campaign.enhanced_brief = Some("shiny".to_string());
        assert_eq!(campaign.effective_brief(), "shiny");
    }

    #[test]
    fn test_validate_accepts_complete_campaign() {
        assert!(create("Launch", "Promote the drop", &["Instagram"]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        assert!(matches!(
            create("  ", "brief", &["Instagram"]).validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_platforms() {
        assert!(create("Launch", "brief", &[]).validate().is_err());
        assert!(create("Launch", "brief", &[" "]).validate().is_err());
    }
}
