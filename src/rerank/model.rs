use std::future::Future;
use std::sync::Arc;

use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest, ChatResponseFormat};
use tracing::debug;

use super::error::LanguageModelError;
use super::prompt::RerankPrompt;

/// Language-model collaborator: one prompt in, raw text out.
pub trait LanguageModel: Send + Sync {
    fn complete(
        &self,
        prompt: &RerankPrompt,
    ) -> impl Future<Output = Result<String, LanguageModelError>> + Send;
}

impl<T: LanguageModel> LanguageModel for Arc<T> {
    fn complete(
        &self,
        prompt: &RerankPrompt,
    ) -> impl Future<Output = Result<String, LanguageModelError>> + Send {
        (**self).complete(prompt)
    }
}

/// [`LanguageModel`] backed by a genai [`Client`] in JSON mode.
///
/// Provider and credentials are resolved by genai from the model name.
#[derive(Clone)]
pub struct GenaiModel {
    client: Client,
    model: String,
}

impl GenaiModel {
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn from_model(model: impl Into<String>) -> Self {
        Self::new(Client::default(), model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for GenaiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiModel")
            .field("model", &self.model)
            .finish()
    }
}

impl LanguageModel for GenaiModel {
    async fn complete(&self, prompt: &RerankPrompt) -> Result<String, LanguageModelError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(prompt.system.clone()),
            ChatMessage::user(prompt.user.clone()),
        ]);
        let options = ChatOptions::default().with_response_format(ChatResponseFormat::JsonMode);

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&options))
            .await?;

        let text = response
            .first_text()
            .ok_or(LanguageModelError::EmptyResponse)?;
        debug!(model = %self.model, len = text.len(), "Language model replied");
        Ok(text.to_string())
    }
}
