use std::time::Duration;

use crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default path appended to the API base in HTTP mode.
pub const DEFAULT_EMBEDDINGS_PATH: &str = "/embeddings";

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// OpenAI-compatible base URL. `None` selects stub mode.
    pub api_base: Option<String>,

    pub path: String,

    pub model: String,

    pub api_key: Option<String>,

    pub dimension: usize,

    pub timeout: Duration,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self::stub()
    }
}

impl EmbeddingConfig {
    pub fn http(api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_base: Some(api_base.into()),
            model: model.into(),
            ..Self::stub()
        }
    }

    pub fn stub() -> Self {
        Self {
            api_base: None,
            path: DEFAULT_EMBEDDINGS_PATH.to_string(),
            model: "stub".to_string(),
            api_key: None,
            dimension: DEFAULT_EMBEDDING_DIM,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_stub(&self) -> bool {
        self.api_base.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.dimension == 0 {
            return Err("dimension must be greater than zero".to_string());
        }

        if let Some(ref base) = self.api_base
            && base.trim().is_empty()
        {
            return Err("api_base cannot be empty when provided".to_string());
        }

        Ok(())
    }

    pub(crate) fn endpoint(&self) -> Option<String> {
        self.api_base
            .as_ref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), self.path))
    }
}
