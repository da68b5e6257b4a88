use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::campaigns::handlers::require_campaign;
use crate::contracts::pdf::render_contract_pdf;
use crate::contracts::repository::insert_contract;
use crate::contracts::template::build_contract_text;
use crate::creators::handlers::require_creator;
use crate::deals::handlers::require_deal;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContractRequest {
    pub deal_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ContractResponse {
    pub contract_text: String,
    pub pdf_url: String,
    pub deal_id: Uuid,
}

/// POST /api/contracts/generate
///
/// deal → agreement text → PDF on disk → contract row (best-effort).
pub async fn handle_generate_contract(
    State(state): State<AppState>,
    Json(req): Json<ContractRequest>,
) -> Result<Json<ContractResponse>, AppError> {
    let deal = require_deal(&state, req.deal_id).await?;
    let campaign = require_campaign(&state, deal.campaign_id).await?;
    let creator = require_creator(&state, deal.creator_id).await?;

    let contract_text = build_contract_text(&deal, &campaign, &creator);
    let pdf = render_contract_pdf(contract_text.clone()).await?;
    let pdf_url = state
        .media
        .save_contract(deal.id, &pdf)
        .await
        .map_err(|e| AppError::Storage(format!("failed to write contract {}: {e}", deal.id)))?;
    info!("Rendered contract for deal {} ({} bytes)", deal.id, pdf.len());

    if let Err(e) = insert_contract(&state.db, deal.id, &contract_text, &pdf_url).await {
        warn!("Failed to store contract row for deal {}: {e}", deal.id);
    }

    Ok(Json(ContractResponse {
        contract_text,
        pdf_url,
        deal_id: deal.id,
    }))
}

/// Accepts `<deal_id>.pdf` or a bare `<deal_id>`.
fn parse_contract_file(file: &str) -> Option<Uuid> {
    Uuid::parse_str(file.strip_suffix(".pdf").unwrap_or(file)).ok()
}

/// GET /api/contracts/download/:file
pub async fn handle_download_contract(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let not_found = || AppError::NotFound("PDF not found".to_string());
    let deal_id = parse_contract_file(&file).ok_or_else(not_found)?;

    let pdf = state
        .media
        .read_contract(deal_id)
        .await
        .map_err(|e| AppError::Storage(format!("failed to read contract {deal_id}: {e}")))?
        .ok_or_else(not_found)?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"Contract_{deal_id}.pdf\""),
        ),
    ];
    Ok((headers, pdf))
}
