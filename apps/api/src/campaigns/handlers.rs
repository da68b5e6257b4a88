use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::campaigns::brief::enhance_brief;
use crate::campaigns::repository::{
    delete_campaign, get_campaign, insert_campaign, list_campaigns, set_enhanced_brief_once,
};
use crate::errors::AppError;
use crate::models::campaign::{Campaign, CampaignCreate};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CampaignListResponse {
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceBriefResponse {
    pub enhanced_brief: String,
}

/// Loads a campaign or fails with 404. Shared by every module that hangs off a campaign.
pub async fn require_campaign(state: &AppState, id: Uuid) -> Result<Campaign, AppError> {
    get_campaign(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Campaign {id} not found")))
}

/// POST /api/campaigns
pub async fn handle_create_campaign(
    State(state): State<AppState>,
    Json(req): Json<CampaignCreate>,
) -> Result<Json<Campaign>, AppError> {
    req.validate()?;
    let campaign = insert_campaign(&state.db, &req).await?;
    tracing::info!("Created campaign {} ({})", campaign.id, campaign.title);
    Ok(Json(campaign))
}

/// GET /api/campaigns
pub async fn handle_list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<CampaignListResponse>, AppError> {
    let campaigns = list_campaigns(&state.db).await?;
    Ok(Json(CampaignListResponse { campaigns }))
}

/// GET /api/campaigns/:id
pub async fn handle_get_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Campaign>, AppError> {
    Ok(Json(require_campaign(&state, id).await?))
}

/// DELETE /api/campaigns/:id
pub async fn handle_delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !delete_campaign(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Campaign {id} not found")));
    }
    Ok(Json(json!({ "message": "Campaign deleted successfully" })))
}

/// POST /api/campaigns/:id/enhance-brief
///
/// The brief is enhanced at most once; later calls return the stored text.
pub async fn handle_enhance_brief(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnhanceBriefResponse>, AppError> {
    let campaign = require_campaign(&state, id).await?;

    if let Some(existing) = campaign.enhanced_brief {
        return Ok(Json(EnhanceBriefResponse {
            enhanced_brief: existing,
        }));
    }

    let generated = enhance_brief(state.llm.as_ref(), &campaign).await?;
    let stored = set_enhanced_brief_once(&state.db, id, &generated)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Campaign {id} not found")))?;

    Ok(Json(EnhanceBriefResponse {
        enhanced_brief: stored,
    }))
}
