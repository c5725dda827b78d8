//! Text-completion capability.

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};

use super::error::ScoringError;

/// One-shot text completion against a named model.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, ScoringError>;
}

/// Provider-backed completion client.
///
/// Provider selection and credentials come from the environment, resolved by
/// `genai` from the model name.
#[derive(Clone, Default)]
pub struct GenAiCompletionClient {
    client: Client,
}

impl GenAiCompletionClient {
    pub fn new() -> Self {
        Self {
            client: Client::default(),
        }
    }
}

#[async_trait]
impl CompletionClient for GenAiCompletionClient {
    async fn complete(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, ScoringError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(system),
            ChatMessage::user(prompt),
        ]);

        let response = self
            .client
            .exec_chat(model, request, None)
            .await
            .map_err(|e| ScoringError::Completion {
                message: e.to_string(),
            })?;

        response
            .first_text()
            .map(|text| text.to_string())
            .ok_or(ScoringError::EmptyResponse)
    }
}
