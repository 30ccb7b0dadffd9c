use std::time::Duration;

use thiserror::Error;

/// Failure of the language-model collaborator. Absorbed by the reranker.
#[derive(Debug, Error)]
pub enum LanguageModelError {
    #[error("language model request failed: {reason}")]
    Request { reason: String },

    #[error("language model returned no text content")]
    EmptyResponse,

    #[error("language model call timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}

impl From<genai::Error> for LanguageModelError {
    fn from(err: genai::Error) -> Self {
        LanguageModelError::Request {
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RerankError {
    #[error("invalid reranker configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Model(#[from] LanguageModelError),

    #[error("unparsable selection: {reason}")]
    Unparsable { reason: String },
}
