use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::campaigns::handlers::require_campaign;
use crate::creators::handlers::require_creator;
use crate::creators::repository::get_creator;
use crate::errors::AppError;
use crate::media::record_voice_message;
use crate::models::outreach::OutreachRow;
use crate::outreach::generator::generate_outreach_content;
use crate::outreach::repository::{insert_outreach, latest_outreach, outreach_for_campaign};
use crate::state::AppState;

/// Upper bound on creators per batch request.
const MAX_BATCH_SIZE: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OutreachRequest {
    pub campaign_id: Uuid,
    pub creator_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct OutreachResponse {
    pub email_content: String,
    pub audio_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchOutreachRequest {
    pub campaign_id: Uuid,
    pub creator_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct BatchItemResult {
    pub creator_id: Uuid,
    pub status: BatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchOutreachResponse {
    pub campaign_id: Uuid,
    pub total_creators: usize,
    pub results: Vec<BatchItemResult>,
    pub success_count: usize,
}

#[derive(Debug, Serialize)]
pub struct OutreachDetail {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub creator_id: Uuid,
    pub email_content: String,
    pub audio_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<OutreachRow> for OutreachDetail {
    fn from(row: OutreachRow) -> Self {
        Self {
            id: row.id,
            campaign_id: row.campaign_id,
            creator_id: row.creator_id,
            email_content: row.outreach_text,
            audio_url: row.audio_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CampaignOutreachResponse {
    pub outreach: Vec<OutreachRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/outreach
///
/// campaign + creator → email (model or template) → voice note (TTS, optional) → persist.
pub async fn handle_generate_outreach(
    State(state): State<AppState>,
    Json(req): Json<OutreachRequest>,
) -> Result<Json<OutreachResponse>, AppError> {
    let campaign = require_campaign(&state, req.campaign_id).await?;
    let creator = require_creator(&state, req.creator_id).await?;

    let content = generate_outreach_content(state.llm.as_ref(), &campaign, &creator).await;

    let audio_url = record_voice_message(
        state.tts.as_ref(),
        &state.media,
        "outreach",
        campaign.id,
        creator.id,
        &content.voice_script,
    )
    .await;

    let row = insert_outreach(
        &state.db,
        campaign.id,
        creator.id,
        &content.email_content,
        audio_url.as_deref(),
    )
    .await?;
    info!("Stored outreach {} for creator {}", row.id, creator.id);

    Ok(Json(OutreachResponse {
        email_content: row.outreach_text,
        audio_url: row.audio_url,
    }))
}

/// POST /api/outreach/batch
///
/// Text-only outreach for many creators; voice notes are skipped to bound API cost.
/// Per-creator failures are reported in the body, not as an HTTP error.
pub async fn handle_batch_outreach(
    State(state): State<AppState>,
    Json(req): Json<BatchOutreachRequest>,
) -> Result<Json<BatchOutreachResponse>, AppError> {
    if req.creator_ids.is_empty() {
        return Err(AppError::Validation("creator_ids cannot be empty".to_string()));
    }
    if req.creator_ids.len() > MAX_BATCH_SIZE {
        return Err(AppError::Validation(format!(
            "at most {MAX_BATCH_SIZE} creators per batch"
        )));
    }

    let campaign = require_campaign(&state, req.campaign_id).await?;
    let mut results = Vec::with_capacity(req.creator_ids.len());

    for &creator_id in &req.creator_ids {
        let creator = match get_creator(&state.db, creator_id).await {
            Ok(Some(creator)) => creator,
            Ok(None) => {
                results.push(BatchItemResult {
                    creator_id,
                    status: BatchStatus::Error,
                    message: Some("Creator not found".to_string()),
                });
                continue;
            }
            Err(e) => {
                warn!("Batch outreach lookup failed for creator {creator_id}: {e}");
                results.push(BatchItemResult {
                    creator_id,
                    status: BatchStatus::Error,
                    message: Some("Database error".to_string()),
                });
                continue;
            }
        };

        let content = generate_outreach_content(state.llm.as_ref(), &campaign, &creator).await;
        let item = match insert_outreach(
            &state.db,
            campaign.id,
            creator.id,
            &content.email_content,
            None,
        )
        .await
        {
            Ok(_) => BatchItemResult {
                creator_id,
                status: BatchStatus::Success,
                message: None,
            },
            Err(e) => {
                warn!("Batch outreach insert failed for creator {creator_id}: {e}");
                BatchItemResult {
                    creator_id,
                    status: BatchStatus::Error,
                    message: Some("Database error".to_string()),
                }
            }
        };
        results.push(item);
    }

    let success_count = results
        .iter()
        .filter(|r| matches!(r.status, BatchStatus::Success))
        .count();
    info!(
        "Batch outreach for campaign {}: {}/{} succeeded",
        campaign.id,
        success_count,
        req.creator_ids.len()
    );

    Ok(Json(BatchOutreachResponse {
        campaign_id: campaign.id,
        total_creators: req.creator_ids.len(),
        results,
        success_count,
    }))
}

/// GET /api/outreach/:campaign_id/:creator_id
pub async fn handle_get_outreach(
    State(state): State<AppState>,
    Path((campaign_id, creator_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<OutreachDetail>, AppError> {
    let row = latest_outreach(&state.db, campaign_id, creator_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Outreach not found".to_string()))?;
    Ok(Json(row.into()))
}

/// GET /api/outreach/campaign/:campaign_id
pub async fn handle_campaign_outreach(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<CampaignOutreachResponse>, AppError> {
    let outreach = outreach_for_campaign(&state.db, campaign_id).await?;
    Ok(Json(CampaignOutreachResponse { outreach }))
}
