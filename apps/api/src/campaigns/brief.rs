//! Brief enhancement: rewrites a campaign brief for creators, once per campaign.

use tracing::info;

use crate::campaigns::prompts::{BRIEF_PROMPT_TEMPLATE, BRIEF_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, platform_text};
use crate::llm_client::{CompletionRequest, LanguageModel};
use crate::models::campaign::Campaign;

pub fn build_brief_prompt(campaign: &Campaign) -> String {
    fill_template(
        BRIEF_PROMPT_TEMPLATE,
        &[
            ("title", campaign.title.as_str()),
            ("audience", campaign.audience.as_str()),
            ("platforms", platform_text(&campaign.platforms).as_str()),
            ("brief", campaign.brief.as_str()),
        ],
    )
}

/// Returns the enhanced brief text. No fallback: a failed rewrite is an error,
/// since storing a placeholder would lock the campaign out of a real one.
pub async fn enhance_brief(llm: &dyn LanguageModel, campaign: &Campaign) -> Result<String, AppError> {
    let prompt = build_brief_prompt(campaign);
    let text = llm
        .complete(CompletionRequest {
            system: BRIEF_SYSTEM,
            prompt: &prompt,
            temperature: 0.7,
            max_tokens: 800,
        })
        .await?;

    info!("Enhanced brief generated for campaign {}", campaign.id);
    Ok(text.trim().to_string())
}
