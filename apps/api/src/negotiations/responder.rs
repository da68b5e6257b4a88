//! Negotiation replies. The agent answers for the side that did not write the message.

use serde::Deserialize;
use tracing::warn;

use crate::llm_client::prompts::{fill_template, platform_text};
use crate::llm_client::{complete_json, CompletionRequest, LanguageModel};
use crate::models::campaign::Campaign;
use crate::models::creator::Creator;
use crate::models::negotiation::{NegotiationRow, Sender};
use crate::negotiations::prompts::{reply_system, REPLY_PROMPT_TEMPLATE};

const BRAND_AGENT_FALLBACK: &str = "I understand your position. We value quality creators and are \
    willing to work within your rate expectations. Let's discuss what deliverables would work best \
    for both parties. We're flexible on timeline and can offer additional exposure through our \
    other channels.";

const CREATOR_AGENT_FALLBACK: &str = "That sounds reasonable. I can deliver high-quality content \
    that aligns with your brand values. My standard package includes 1 main post, 3 stories, and \
    a reel with 2 rounds of revisions. How does that sound?";

#[derive(Debug, Deserialize)]
struct ReplyPayload {
    #[serde(default)]
    response: String,
}

/// Canned reply used whenever the model is unavailable.
pub fn fallback_reply(sender: Sender) -> &'static str {
    match sender {
        Sender::Creator => BRAND_AGENT_FALLBACK,
        Sender::Brand => CREATOR_AGENT_FALLBACK,
    }
}

fn role_description(side: Sender, campaign: &Campaign, creator: &Creator) -> String {
    match side {
        Sender::Brand => format!("the brand's partnership manager for \"{}\"", campaign.title),
        Sender::Creator => format!("the creator {} ({})", creator.name, creator.handle),
    }
}

/// One line per message, oldest first. Agent replies are labelled with the side they spoke for.
pub fn render_transcript(history: &[NegotiationRow]) -> String {
    history
        .iter()
        .map(|row| {
            let side = Sender::from_db(&row.sender);
            let writer = side.map_or(row.sender.as_str(), |s| s.as_str());
            let agent = side.map_or("agent", |s| s.counterpart().as_str());
            format!(
                "{writer}: {}\n{agent} (AI agent): {}",
                row.message.trim(),
                row.ai_response.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_reply_prompt(
    campaign: &Campaign,
    creator: &Creator,
    history: &[NegotiationRow],
    message: &str,
    sender: Sender,
) -> String {
    let history_text = if history.is_empty() {
        "(no earlier messages)".to_string()
    } else {
        render_transcript(history)
    };

    fill_template(
        REPLY_PROMPT_TEMPLATE,
        &[
            ("role", role_description(sender.counterpart(), campaign, creator).as_str()),
            ("counterpart", role_description(sender, campaign, creator).as_str()),
            ("title", campaign.title.as_str()),
            ("brief", campaign.effective_brief()),
            ("budget", campaign.budget.as_str()),
            ("platforms", platform_text(&campaign.platforms).as_str()),
            ("name", creator.name.as_str()),
            ("handle", creator.handle.as_str()),
            ("platform", creator.platform.as_str()),
            ("followers", creator.followers.as_str()),
            ("category", creator.category.as_str()),
            ("sender", sender.as_str().to_uppercase().as_str()),
            ("history", history_text.as_str()),
            ("message", message.trim()),
        ],
    )
}

/// Never fails; falls back to the canned reply for `sender`.
pub async fn generate_reply(
    llm: &dyn LanguageModel,
    campaign: &Campaign,
    creator: &Creator,
    history: &[NegotiationRow],
    message: &str,
    sender: Sender,
) -> String {
    let prompt = build_reply_prompt(campaign, creator, history, message, sender);
    let system = reply_system();
    let request = CompletionRequest {
        system: &system,
        prompt: &prompt,
        temperature: 0.7,
        max_tokens: 500,
    };

    match complete_json::<ReplyPayload>(llm, request).await {
        Ok(payload) if !payload.response.trim().is_empty() => payload.response.trim().to_string(),
        Ok(_) => {
            warn!("Model returned an empty negotiation reply; using canned reply");
            fallback_reply(sender).to_string()
        }
        Err(e) => {
            warn!(
                "Negotiation reply failed for campaign {} / creator {}: {e}",
                campaign.id, creator.id
            );
            fallback_reply(sender).to_string()
        }
    }
}
