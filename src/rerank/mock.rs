use std::time::Duration;

use parking_lot::Mutex;

use super::error::LanguageModelError;
use super::model::LanguageModel;
use super::prompt::RerankPrompt;

/// Scripted reply of a [`ScriptedModel`].
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    Fail(String),
    /// Never answers within any reasonable timeout.
    Hang,
}

/// [`LanguageModel`] test double returning a fixed reply and recording calls.
#[derive(Debug)]
pub struct ScriptedModel {
    reply: ScriptedReply,
    prompts: Mutex<Vec<RerankPrompt>>,
}

impl ScriptedModel {
    pub fn new(reply: ScriptedReply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(ScriptedReply::Text(text.into()))
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::new(ScriptedReply::Fail(reason.into()))
    }

    pub fn hanging() -> Self {
        Self::new(ScriptedReply::Hang)
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn last_prompt(&self) -> Option<RerankPrompt> {
        self.prompts.lock().last().cloned()
    }
}

impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &RerankPrompt) -> Result<String, LanguageModelError> {
        self.prompts.lock().push(prompt.clone());

        match &self.reply {
            ScriptedReply::Text(text) => Ok(text.clone()),
            ScriptedReply::Fail(reason) => Err(LanguageModelError::Request {
                reason: reason.clone(),
            }),
            ScriptedReply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(LanguageModelError::EmptyResponse)
            }
        }
    }
}
