//! Conversation summaries for a negotiation thread.

use tracing::warn;

use crate::llm_client::prompts::fill_template;
use crate::llm_client::{CompletionRequest, LanguageModel};
use crate::models::negotiation::NegotiationRow;
use crate::negotiations::prompts::{SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM};
use crate::negotiations::responder::render_transcript;

pub const SUMMARY_UNAVAILABLE: &str =
    "Unable to generate summary at the moment. Please try again later.";
pub const NOTHING_TO_SUMMARIZE: &str = "No negotiation messages to summarize yet.";

/// Plain-text summary. An empty thread is answered without calling the model.
pub async fn summarize_negotiation(llm: &dyn LanguageModel, history: &[NegotiationRow]) -> String {
    if history.is_empty() {
        return NOTHING_TO_SUMMARIZE.to_string();
    }

    let prompt = fill_template(
        SUMMARY_PROMPT_TEMPLATE,
        &[("conversation", render_transcript(history).as_str())],
    );
    let request = CompletionRequest {
        system: SUMMARY_SYSTEM,
        prompt: &prompt,
        temperature: 0.5,
        max_tokens: 500,
    };

    match llm.complete(request).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => SUMMARY_UNAVAILABLE.to_string(),
        Err(e) => {
            warn!("Negotiation summary failed: {e}");
            SUMMARY_UNAVAILABLE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::negotiation::Sender;
    use crate::negotiations::responder::fixtures::turn;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingModel {
        calls: AtomicUsize,
        result: Result<&'static str, ()>,
    }

    #[async_trait]
    impl LanguageModel for CountingModel {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(request.prompt.contains("creator: 40k"));
            self.result
                .map(str::to_string)
                .map_err(|_| LlmError::EmptyContent)
        }
    }

    #[tokio::test]
    async fn test_summary_from_model() {
        let model = CountingModel {
            calls: AtomicUsize::new(0),
            result: Ok("Deal closed at 35k.\n"),
        };
        let history = vec![turn(Sender::Creator, "40k", "30k")];
        assert_eq!(summarize_negotiation(&model, &history).await, "Deal closed at 35k.");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_summary_fallback_on_error() {
        let model = CountingModel {
            calls: AtomicUsize::new(0),
            result: Err(()),
        };
        let history = vec![turn(Sender::Creator, "40k", "30k")];
        assert_eq!(summarize_negotiation(&model, &history).await, SUMMARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_empty_thread_skips_model() {
        let model = CountingModel {
            calls: AtomicUsize::new(0),
            result: Ok("unused"),
        };
        assert_eq!(summarize_negotiation(&model, &[]).await, NOTHING_TO_SUMMARIZE);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }
}
