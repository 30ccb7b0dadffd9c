use std::time::Duration;

use crate::constants::{
    BROAD_FALLBACK_LEN, DEFAULT_RERANK_TIMEOUT_MS, DESCRIPTION_PREVIEW_CHARS, MAX_SELECTION,
    MIN_SELECTION, NARROW_FALLBACK_LEN,
};

use super::error::RerankError;

#[derive(Debug, Clone)]
pub struct RerankerConfig {
    /// Model identifier handed to the language-model client.
    pub model: String,

    /// Bounded wait on the single model call.
    pub timeout: Duration,

    pub min_selection: usize,
    pub max_selection: usize,

    /// Tier-1 fallback length (model failure).
    pub broad_fallback: usize,

    /// Tier-2 fallback length (nothing valid selected).
    pub narrow_fallback: usize,

    /// Characters of description shown per candidate in the prompt.
    pub preview_chars: usize,

    /// Post-validate selections for mixed-intent queries.
    pub enforce_balance: bool,
}

impl Default for RerankerConfig {
    fn default() -> Self {
        Self {
            model: crate::config::DEFAULT_LLM_MODEL.to_string(),
            timeout: Duration::from_millis(DEFAULT_RERANK_TIMEOUT_MS),
            min_selection: MIN_SELECTION,
            max_selection: MAX_SELECTION,
            broad_fallback: BROAD_FALLBACK_LEN,
            narrow_fallback: NARROW_FALLBACK_LEN,
            preview_chars: DESCRIPTION_PREVIEW_CHARS,
            enforce_balance: false,
        }
    }
}

impl RerankerConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_enforce_balance(mut self, enforce: bool) -> Self {
        self.enforce_balance = enforce;
        self
    }

    pub fn validate(&self) -> Result<(), RerankError> {
        if self.model.trim().is_empty() {
            return Err(RerankError::InvalidConfig {
                reason: "model cannot be empty".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(RerankError::InvalidConfig {
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        if self.min_selection == 0 || self.min_selection > self.max_selection {
            return Err(RerankError::InvalidConfig {
                reason: format!(
                    "selection bounds must satisfy 0 < min <= max, got {}..={}",
                    self.min_selection, self.max_selection
                ),
            });
        }
        if self.narrow_fallback == 0 || self.broad_fallback == 0 {
            return Err(RerankError::InvalidConfig {
                reason: "fallback lengths must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
