// All LLM prompt constants for negotiation replies and summaries.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub fn reply_system() -> String {
    format!(
        "You are a skilled negotiator in influencer marketing deals. You stay polite, \
         concrete and concise, and you move the conversation toward an agreement. \
         {JSON_ONLY_INSTRUCTION}"
    )
}

/// Negotiation reply prompt template.
/// Replace: {role}, {counterpart}, {title}, {brief}, {budget}, {platforms},
///          {name}, {handle}, {platform}, {followers}, {category},
///          {history}, {sender}, {message}
pub const REPLY_PROMPT_TEMPLATE: &str = r#"You are acting as {role} in an influencer collaboration negotiation with {counterpart}.

CAMPAIGN:
- Title: {title}
- Brief: {brief}
- Budget: {budget} INR
- Platforms: {platforms}

CREATOR:
- Name: {name}
- Handle: {handle}
- Platform: {platform}
- Followers: {followers}
- Category: {category}

CONVERSATION SO FAR:
{history}

NEW MESSAGE FROM THE {sender}:
{message}

Write the next reply. Address rates, deliverables and timeline where relevant.
Keep it under 120 words so it can also be read aloud.

Return a JSON object:
{
  "response": "your reply"
}"#;

pub const SUMMARY_SYSTEM: &str =
    "You are an expert conversation summarizer. Always provide a concise and structured summary.";

/// Negotiation summary prompt template.
/// Replace: {conversation}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Summarize this influencer negotiation conversation:

{conversation}

Include:
- Key negotiation points discussed
- Agreed rates and deliverables
- Timeline and next steps
- Overall outcome (deal closed, ongoing, declined)"#;
