use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::campaigns::handlers::require_campaign;
use crate::creators::handlers::require_creator;
use crate::deals::repository::{delete_deal, get_deal, insert_deal, list_deals};
use crate::errors::AppError;
use crate::models::deal::{DealRequest, DealRow};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DealListResponse {
    pub deals: Vec<DealRow>,
}

pub async fn require_deal(state: &AppState, id: Uuid) -> Result<DealRow, AppError> {
    get_deal(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Deal {id} not found")))
}

/// POST /api/deals
pub async fn handle_create_deal(
    State(state): State<AppState>,
    Json(req): Json<DealRequest>,
) -> Result<Json<DealRow>, AppError> {
    req.validate()?;
    require_campaign(&state, req.campaign_id).await?;
    require_creator(&state, req.creator_id).await?;

    let deal = insert_deal(&state.db, &req).await?;
    info!(
        "Finalized deal {} for campaign {} / creator {}",
        deal.id, deal.campaign_id, deal.creator_id
    );
    Ok(Json(deal))
}

/// GET /api/deals
pub async fn handle_list_deals(
    State(state): State<AppState>,
) -> Result<Json<DealListResponse>, AppError> {
    let deals = list_deals(&state.db).await?;
    Ok(Json(DealListResponse { deals }))
}

/// GET /api/deals/:id
pub async fn handle_get_deal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DealRow>, AppError> {
    Ok(Json(require_deal(&state, id).await?))
}

/// DELETE /api/deals/:id
pub async fn handle_delete_deal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !delete_deal(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Deal {id} not found")));
    }
    Ok(Json(json!({ "message": "Deal deleted successfully" })))
}
