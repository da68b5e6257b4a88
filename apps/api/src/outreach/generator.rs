//! Outreach content: email + voice script from the model, with templated fallbacks.

use serde::Deserialize;
use tracing::warn;

use crate::llm_client::prompts::{fill_template, platform_text};
use crate::llm_client::{complete_json, CompletionRequest, LanguageModel};
use crate::models::campaign::Campaign;
use crate::models::creator::Creator;
use crate::outreach::prompts::{outreach_system, OUTREACH_PROMPT_TEMPLATE};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutreachContent {
    #[serde(default)]
    pub email_content: String,
    #[serde(default)]
    pub voice_script: String,
}

/// Generates outreach content. Never fails: a model error or an empty field
/// is replaced by the templated fallback.
pub async fn generate_outreach_content(
    llm: &dyn LanguageModel,
    campaign: &Campaign,
    creator: &Creator,
) -> OutreachContent {
    let prompt = build_outreach_prompt(campaign, creator);
    let system = outreach_system();
    let request = CompletionRequest {
        system: &system,
        prompt: &prompt,
        temperature: 0.7,
        max_tokens: 1000,
    };

    match complete_json::<OutreachContent>(llm, request).await {
        Ok(mut content) => {
            if content.email_content.trim().is_empty() {
                warn!("Model returned no email for creator {}; using template", creator.id);
                content.email_content = fallback_email(campaign, creator);
            }
            if content.voice_script.trim().is_empty() {
                content.voice_script = fallback_voice_script(campaign, creator);
            }
            content
        }
        Err(e) => {
            warn!(
                "Outreach generation failed for campaign {} / creator {}: {e}",
                campaign.id, creator.id
            );
            OutreachContent {
                email_content: fallback_email(campaign, creator),
                voice_script: fallback_voice_script(campaign, creator),
            }
        }
    }
}

pub fn build_outreach_prompt(campaign: &Campaign, creator: &Creator) -> String {
    fill_template(
        OUTREACH_PROMPT_TEMPLATE,
        &[
            ("title", campaign.title.as_str()),
            ("brief", campaign.effective_brief()),
            ("audience", campaign.audience.as_str()),
            ("platforms", platform_text(&campaign.platforms).as_str()),
            ("budget", campaign.budget.as_str()),
            ("offer", half_budget(&campaign.budget).as_str()),
            ("name", creator.name.as_str()),
            ("handle", creator.handle.as_str()),
            ("platform", creator.platform.as_str()),
            ("followers", creator.followers.as_str()),
            ("category", creator.category.as_str()),
            ("location", creator.location.as_str()),
        ],
    )
}

/// Half of a free-text budget, rounded down. "50,000" → "25000", "2.5 lakh" → "125000".
/// Budgets without exactly one figure (ranges, "negotiable") are described instead.
pub fn half_budget(budget: &str) -> String {
    match budget_amount(budget) {
        Some(amount) => ((amount / 2.0).floor() as u64).to_string(),
        None => format!("half of {}", budget.trim()),
    }
}

/// The single figure in a budget with its `k` / `lakh` / `crore` / `million` unit applied.
fn budget_amount(budget: &str) -> Option<f64> {
    let start = budget.find(|c: char| c.is_ascii_digit())?;
    let rest = &budget[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '.'))
        .unwrap_or(rest.len());
    let (figure, tail) = rest.split_at(end);
    if tail.contains(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let amount: f64 = figure
        .trim_end_matches(|c: char| c == ',' || c == '.')
        .replace(',', "")
        .parse()
        .ok()?;
    let unit = tail
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();
    let multiplier = match unit.as_str() {
        "k" | "thousand" => 1e3,
        "l" | "lac" | "lacs" | "lakh" | "lakhs" => 1e5,
        "m" | "mn" | "million" => 1e6,
        "cr" | "crore" | "crores" => 1e7,
        _ => 1.0,
    };
    Some(amount * multiplier).filter(|a| a.is_finite())
}

pub fn fallback_email(campaign: &Campaign, creator: &Creator) -> String {
    format!(
        "Subject: Collaboration Opportunity - {title}\n\
         \n\
         Hi {name},\n\
         \n\
         I've been following your {category} content on {platform} and I'm impressed by your engagement with your audience.\n\
         \n\
         We're launching {title} and think you'd be a perfect fit for our campaign targeting {audience}.\n\
         \n\
         Campaign Details:\n\
         {brief}\n\
         \n\
         Budget: {budget} INR\n\
         Platform: {platforms}\n\
         \n\
         Would you be interested in discussing this collaboration opportunity?\n\
         \n\
         Thank you!",
        title = campaign.title,
        name = creator.name,
        category = creator.category,
        platform = creator.platform,
        audience = campaign.audience,
        brief = campaign.effective_brief(),
        budget = campaign.budget,
        platforms = platform_text(&campaign.platforms),
    )
}

pub fn fallback_voice_script(campaign: &Campaign, creator: &Creator) -> String {
    format!(
        "Hi {}, I've been following your {} content and think you'd be perfect for our {} campaign. \
         Would you be interested in discussing a collaboration?",
        creator.name, creator.category, campaign.title
    )
}
