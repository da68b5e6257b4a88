use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::campaigns::handlers::require_campaign;
use crate::creators::handlers::require_creator;
use crate::errors::AppError;
use crate::media::record_voice_message;
use crate::models::negotiation::{NegotiationRow, Sender};
use crate::negotiations::repository::{insert_negotiation, negotiation_history, NewNegotiation};
use crate::negotiations::responder::generate_reply;
use crate::negotiations::summary::summarize_negotiation;
use crate::state::AppState;

/// Sender label on every agent reply.
const AGENT_SENDER: &str = "ai_agent";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NegotiationRequest {
    pub campaign_id: Uuid,
    pub creator_id: Uuid,
    pub message: String,
    pub sender: Sender,
}

#[derive(Debug, Serialize)]
pub struct NegotiationReply {
    pub response: String,
    pub audio_url: Option<String>,
    pub sender: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NegotiationHistoryResponse {
    pub messages: Vec<NegotiationRow>,
}

#[derive(Debug, Serialize)]
pub struct NegotiationSummaryResponse {
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/negotiations/respond
///
/// history → agent reply (model or canned) → voice note → log. Logging the turn is
/// best-effort: the reply is returned even if the insert fails.
pub async fn handle_respond(
    State(state): State<AppState>,
    Json(req): Json<NegotiationRequest>,
) -> Result<Json<NegotiationReply>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let campaign = require_campaign(&state, req.campaign_id).await?;
    let creator = require_creator(&state, req.creator_id).await?;
    let history = negotiation_history(&state.db, campaign.id, creator.id).await?;

    let response = generate_reply(
        state.llm.as_ref(),
        &campaign,
        &creator,
        &history,
        &req.message,
        req.sender,
    )
    .await;

    let audio_url = record_voice_message(
        state.tts.as_ref(),
        &state.media,
        "negotiation",
        campaign.id,
        creator.id,
        &response,
    )
    .await;

    let turn = NewNegotiation {
        campaign_id: campaign.id,
        creator_id: creator.id,
        message: req.message.trim(),
        sender: req.sender,
        ai_response: &response,
        audio_url: audio_url.as_deref(),
    };
    match insert_negotiation(&state.db, &turn).await {
        Ok(row) => info!(
            "Logged negotiation turn {} ({} → agent) for creator {}",
            row.id,
            req.sender.as_str(),
            creator.id
        ),
        Err(e) => warn!("Failed to store negotiation turn for creator {}: {e}", creator.id),
    }

    Ok(Json(NegotiationReply {
        response,
        audio_url,
        sender: AGENT_SENDER,
    }))
}

/// GET /api/negotiations/:campaign_id/:creator_id
pub async fn handle_history(
    State(state): State<AppState>,
    Path((campaign_id, creator_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<NegotiationHistoryResponse>, AppError> {
    let messages = negotiation_history(&state.db, campaign_id, creator_id).await?;
    Ok(Json(NegotiationHistoryResponse { messages }))
}

/// GET /api/negotiations/:campaign_id/:creator_id/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Path((campaign_id, creator_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<NegotiationSummaryResponse>, AppError> {
    let history = negotiation_history(&state.db, campaign_id, creator_id).await?;
    let summary = summarize_negotiation(state.llm.as_ref(), &history).await;
    Ok(Json(NegotiationSummaryResponse { summary }))
}
