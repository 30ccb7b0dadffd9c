//! Query/document embedding.
//!
//! [`TextEmbedder`] runs in one of two modes:
//! - **HTTP**: posts to an OpenAI-compatible `/embeddings` endpoint.
//! - **Stub**: deterministic hashed bag-of-words vectors, so the service and its
//!   tests run without a model provider.

pub mod config;
mod error;

pub use config::{DEFAULT_EMBEDDINGS_PATH, EmbeddingConfig};
pub use error::EmbeddingError;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::hashing::hash_token;

pub struct TextEmbedder {
    config: EmbeddingConfig,
    client: Option<Client>,
}

impl std::fmt::Debug for TextEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEmbedder")
            .field("model", &self.config.model)
            .field("dimension", &self.config.dimension)
            .field("stub", &self.is_stub())
            .finish()
    }
}

impl TextEmbedder {
    pub fn load(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        config
            .validate()
            .map_err(|reason| EmbeddingError::InvalidConfig { reason })?;

        if config.is_stub() {
            info!(
                dimension = config.dimension,
                "No embedding endpoint configured, operating in stub mode"
            );
            return Ok(Self {
                config,
                client: None,
            });
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        info!(
            model = %config.model,
            dimension = config.dimension,
            "Embedding endpoint configured"
        );

        Ok(Self {
            config,
            client: Some(client),
        })
    }

    pub fn stub() -> Self {
        Self {
            config: EmbeddingConfig::stub(),
            client: None,
        }
    }

    pub fn is_stub(&self) -> bool {
        self.client.is_none()
    }

    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let (Some(client), Some(url)) = (&self.client, self.config.endpoint()) else {
            return Ok(stub_embedding(text, self.config.dimension));
        };

        debug!(text_len = text.len(), model = %self.config.model, "Requesting embedding");

        let body = serde_json::json!({
            "model": self.config.model,
            "input": [text],
            "dimensions": self.config.dimension,
        });

        let mut request = client.post(url).json(&body);
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        let json: Value = request.send().await?.error_for_status()?.json().await?;
        let vector = parse_embedding_response(&json)?;

        if vector.len() != self.config.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimension,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }
}

/// Extracts the first embedding from an OpenAI-style `{ "data": [{ "embedding": [...] }] }` body.
pub(crate) fn parse_embedding_response(json: &Value) -> Result<Vec<f32>, EmbeddingError> {
    let first = json
        .get("data")
        .and_then(Value::as_array)
        .and_then(|data| data.first())
        .ok_or_else(|| EmbeddingError::InvalidResponse {
            reason: "missing data array".to_string(),
        })?;

    let values = first
        .get("embedding")
        .and_then(Value::as_array)
        .ok_or_else(|| EmbeddingError::InvalidResponse {
            reason: "item missing embedding array".to_string(),
        })?;

    values
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| EmbeddingError::InvalidResponse {
                    reason: "embedding value must be numeric".to_string(),
                })
        })
        .collect()
}

/// Hashed term-frequency vector, L2-normalised. Empty text maps to the zero vector.
pub(crate) fn stub_embedding(text: &str, dimension: usize) -> Vec<f32> {
    let mut vector = vec![0.0f32; dimension];
    let lowered = text.to_lowercase();

    for token in lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let bucket = (hash_token(token) % dimension as u64) as usize;
        vector[bucket] += 1.0;
    }

    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vector {
            *x /= norm;
        }
    }
    vector
}
