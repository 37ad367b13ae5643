use crate::core::prompts::{
    build_narrative_prompt, NARRATIVE_MAX_TOKENS, NARRATIVE_SYSTEM_PROMPT, NARRATIVE_TEMPERATURE,
};
use crate::models::LibraryEntry;
use crate::services::completion::{ChatMessage, ChatRequest, CompletionClient, CompletionError};
use std::sync::Arc;

/// Writes narrative shidduch profiles from a library entry plus research
/// notes
///
/// Unlike parsing and scoring there is no degradation policy here: a failed
/// call is a plain error for the caller to surface.
#[derive(Clone)]
pub struct ProfileWriter {
    completion: Arc<CompletionClient>,
    model: String,
}

impl ProfileWriter {
    pub fn new(completion: Arc<CompletionClient>, model: String) -> Self {
        Self { completion, model }
    }

    pub async fn write(
        &self,
        entry: &LibraryEntry,
        notes: &[String],
    ) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(NARRATIVE_SYSTEM_PROMPT),
                ChatMessage::user(build_narrative_prompt(entry, notes)),
            ],
            temperature: NARRATIVE_TEMPERATURE,
            max_tokens: NARRATIVE_MAX_TOKENS,
        };

        self.completion.chat(&request).await
    }
}
