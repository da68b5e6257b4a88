// All LLM prompt constants for outreach generation.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub fn outreach_system() -> String {
    format!(
        "You are an expert at writing personalized outreach emails for influencer marketing. \
         {JSON_ONLY_INSTRUCTION}"
    )
}

/// Outreach prompt template.
/// Replace: {title}, {brief}, {audience}, {platforms}, {budget}, {offer},
///          {name}, {handle}, {platform}, {followers}, {category}, {location}
pub const OUTREACH_PROMPT_TEMPLATE: &str = r#"Create a personalized outreach email for an influencer collaboration.

CAMPAIGN:
- Title: {title}
- Brief: {brief}
- Target Audience: {audience}
- Platforms: {platforms}
- Budget: {budget} INR (offer the creator {offer}, i.e. 50% of the budget)

CREATOR:
- Name: {name}
- Handle: {handle}
- Platform: {platform}
- Followers: {followers}
- Category: {category}
- Location: {location}

Create:
1. A professional email with a subject line. Do not include any signature or closing; end by thanking them.
2. A shorter voice message script of about 40 seconds when spoken.

Make it personal, professional, and engaging.

Return a JSON object:
{
  "email_content": "full email with subject line",
  "voice_script": "shorter version for voice message"
}"#;
