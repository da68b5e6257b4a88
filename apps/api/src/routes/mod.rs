pub mod health;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use tracing::warn;

use crate::media::AUDIO_URL_PREFIX;
use crate::state::AppState;
use crate::{campaigns, contracts, creators, deals, negotiations, outreach};

pub fn build_router(state: AppState) -> Router {
    let audio = ServeDir::new(state.media.audio_dir());

    Router::new()
        .route("/api/health", get(health::health_handler))
        // Campaigns
        .route(
            "/api/campaigns",
            get(campaigns::handlers::handle_list_campaigns)
                .post(campaigns::handlers::handle_create_campaign),
        )
        .route(
            "/api/campaigns/:id",
            get(campaigns::handlers::handle_get_campaign)
                .delete(campaigns::handlers::handle_delete_campaign),
        )
        .route(
            "/api/campaigns/:id/enhance-brief",
            post(campaigns::handlers::handle_enhance_brief),
        )
        // Creators
        .route(
            "/api/creators",
            get(creators::handlers::handle_list_creators)
                .post(creators::handlers::handle_create_creator),
        )
        .route(
            "/api/creators/count",
            get(creators::handlers::handle_count_creators),
        )
        .route(
            "/api/creators/search",
            post(creators::handlers::handle_search_creators),
        )
        .route(
            "/api/creators/:id",
            delete(creators::handlers::handle_delete_creator),
        )
        // Outreach
        .route("/api/outreach", post(outreach::handlers::handle_generate_outreach))
        .route(
            "/api/outreach/batch",
            post(outreach::handlers::handle_batch_outreach),
        )
        .route(
            "/api/outreach/campaign/:campaign_id",
            get(outreach::handlers::handle_campaign_outreach),
        )
        .route(
            "/api/outreach/:campaign_id/:creator_id",
            get(outreach::handlers::handle_get_outreach),
        )
        // Negotiations
        .route(
            "/api/negotiations/respond",
            post(negotiations::handlers::handle_respond),
        )
        .route(
            "/api/negotiations/:campaign_id/:creator_id",
            get(negotiations::handlers::handle_history),
        )
        .route(
            "/api/negotiations/:campaign_id/:creator_id/summary",
            get(negotiations::handlers::handle_summary),
        )
        // Deals
        .route(
            "/api/deals",
            get(deals::handlers::handle_list_deals).post(deals::handlers::handle_create_deal),
        )
        .route(
            "/api/deals/:id",
            get(deals::handlers::handle_get_deal).delete(deals::handlers::handle_delete_deal),
        )
        // Contracts
        .route(
            "/api/contracts/generate",
            post(contracts::handlers::handle_generate_contract),
        )
        .route(
            "/api/contracts/download/:file",
            get(contracts::handlers::handle_download_contract),
        )
        .nest_service(AUDIO_URL_PREFIX, audio)
        .with_state(state)
}

/// CORS for the configured frontend origins. `*` allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
