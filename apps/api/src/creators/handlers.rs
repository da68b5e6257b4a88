use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::campaigns::handlers::require_campaign;
use crate::creators::repository::{
    count_creators, delete_creator, get_creator, insert_creator, list_creators, CreatorFilter,
};
use crate::errors::AppError;
use crate::models::creator::{Creator, CreatorCreate};
use crate::ranking::RankedCreator;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreatorListQuery {
    pub category: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatorCountResponse {
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreatorSearchRequest {
    pub query: String,
    pub campaign_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CreatorSearchResponse {
    pub results: Vec<RankedCreator>,
    pub query_processed: String,
    pub semantic_matches: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// Loads a creator or fails with 404.
pub async fn require_creator(state: &AppState, id: Uuid) -> Result<Creator, AppError> {
    get_creator(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Creator {id} not found")))
}

/// GET /api/creators?category=&platform=
pub async fn handle_list_creators(
    State(state): State<AppState>,
    Query(params): Query<CreatorListQuery>,
) -> Result<Json<Vec<Creator>>, AppError> {
    let filter = CreatorFilter {
        category: params.category.filter(|c| !c.trim().is_empty()),
        platform: params.platform.filter(|p| !p.trim().is_empty()),
    };
    Ok(Json(list_creators(&state.db, &filter).await?))
}

/// POST /api/creators
pub async fn handle_create_creator(
    State(state): State<AppState>,
    Json(req): Json<CreatorCreate>,
) -> Result<Json<Creator>, AppError> {
    req.validate()?;
    let creator = insert_creator(&state.db, &req).await?;
    info!("Created creator {} ({})", creator.id, creator.handle);
    Ok(Json(creator))
}

/// GET /api/creators/count
pub async fn handle_count_creators(
    State(state): State<AppState>,
) -> Result<Json<CreatorCountResponse>, AppError> {
    let count = count_creators(&state.db).await?;
    Ok(Json(CreatorCountResponse { count }))
}

/// DELETE /api/creators/:id
pub async fn handle_delete_creator(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !delete_creator(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Creator {id} not found")));
    }
    Ok(Json(json!({ "message": "Creator deleted successfully" })))
}

/// POST /api/creators/search
///
/// Ranks the full roster against the campaign. Never fails because of the model:
/// the ranker falls back to keyword scoring on its own. A blank query is allowed
/// and ranks on the campaign text alone.
pub async fn handle_search_creators(
    State(state): State<AppState>,
    Json(req): Json<CreatorSearchRequest>,
) -> Result<Json<CreatorSearchResponse>, AppError> {
    let campaign = require_campaign(&state, req.campaign_id).await?;
    let creators = list_creators(&state.db, &CreatorFilter::default()).await?;

    let ranking = state.ranker.rank(&campaign, &req.query, &creators).await;
    info!(
        "Creator search for campaign {}: {} results via {:?}",
        campaign.id,
        ranking.results.len(),
        ranking.backend
    );

    Ok(Json(CreatorSearchResponse {
        results: ranking.results,
        query_processed: req.query,
        semantic_matches: ranking.semantic_matches,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::campaign::fixtures::campaign;
    use crate::models::creator::fixtures::creator;
    use crate::ranking::keyword::rank_by_keywords;

    #[test]
    fn test_search_response_shape() {
        let campaign = campaign("Glow Week", "Vitamin C serum launch", "skincare fans", &["Instagram"]);
        let creators = vec![creator("Mira", "Instagram", "Beauty", "Mumbai", "serum reviews")];
        let ranking = rank_by_keywords(&campaign, "serum", &creators);

        let response = CreatorSearchResponse {
            results: ranking.results,
            query_processed: "serum".to_string(),
            semantic_matches: ranking.semantic_matches,
        };
        let json = serde_json::to_value(&response).unwrap();

        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["query_processed", "results", "semantic_matches"]);
        assert!(json.get("backend").is_none());
        assert_eq!(json["query_processed"], "serum");

        let first = &json["results"][0];
        assert_eq!(first["name"], "Mira");
        assert_eq!(first["handle"], "@mira");
        assert!(first["match_score"].as_u64().unwrap() <= 100);
        assert!(first.get("ai_insights").is_none());
        assert!(first.get("creator").is_none());
    }
}
