// Negotiation: AI-agent replies, conversation history and summaries.

pub mod handlers;
pub mod prompts;
pub mod repository;
pub mod responder;
pub mod summary;
