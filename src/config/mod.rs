//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SHORTLIST_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_RERANK_TIMEOUT_MS, DEFAULT_RETRIEVAL_K};
use crate::embedding::EmbeddingConfig;
use crate::rerank::RerankerConfig;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SHORTLIST_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Catalog collection name. Default: `shl_assessments`.
    pub collection: String,

    /// Candidates pulled per request. Default: `25`.
    pub retrieval_k: u64,

    /// Model identifier handed to genai for reranking.
    pub llm_model: String,

    /// Bounded wait on the reranker call, in milliseconds.
    pub rerank_timeout_ms: u64,

    /// Repair single-family selections for mixed-intent queries.
    pub enforce_balance: bool,

    /// OpenAI-compatible embeddings base URL. `None` runs the stub embedder.
    pub embedding_api_base: Option<String>,

    pub embedding_model: String,

    pub embedding_api_key: Option<String>,

    pub embedding_dim: usize,

    pub embedding_timeout_ms: u64,
}

/// Default Qdrant URL used when `SHORTLIST_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default catalog collection.
pub const DEFAULT_COLLECTION: &str = "shl_assessments";

/// Default reranker model.
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash";

/// Default embeddings model (only used in HTTP mode).
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            retrieval_k: DEFAULT_RETRIEVAL_K,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            rerank_timeout_ms: DEFAULT_RERANK_TIMEOUT_MS,
            enforce_balance: false,
            embedding_api_base: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_api_key: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            embedding_timeout_ms: 10_000,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SHORTLIST_PORT";
    const ENV_BIND_ADDR: &'static str = "SHORTLIST_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "SHORTLIST_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "SHORTLIST_COLLECTION";
    const ENV_RETRIEVAL_K: &'static str = "SHORTLIST_RETRIEVAL_K";
    const ENV_LLM_MODEL: &'static str = "SHORTLIST_LLM_MODEL";
    const ENV_RERANK_TIMEOUT_MS: &'static str = "SHORTLIST_RERANK_TIMEOUT_MS";
    const ENV_ENFORCE_BALANCE: &'static str = "SHORTLIST_ENFORCE_BALANCE";
    const ENV_EMBEDDING_API_BASE: &'static str = "SHORTLIST_EMBEDDING_API_BASE";
    const ENV_EMBEDDING_MODEL: &'static str = "SHORTLIST_EMBEDDING_MODEL";
    const ENV_EMBEDDING_API_KEY: &'static str = "SHORTLIST_EMBEDDING_API_KEY";
    const ENV_EMBEDDING_DIM: &'static str = "SHORTLIST_EMBEDDING_DIM";
    const ENV_EMBEDDING_TIMEOUT_MS: &'static str = "SHORTLIST_EMBEDDING_TIMEOUT_MS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection = Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection);
        let retrieval_k = Self::parse_u64_from_env(Self::ENV_RETRIEVAL_K, defaults.retrieval_k)?;
        let llm_model = Self::parse_string_from_env(Self::ENV_LLM_MODEL, defaults.llm_model);
        let rerank_timeout_ms =
            Self::parse_u64_from_env(Self::ENV_RERANK_TIMEOUT_MS, defaults.rerank_timeout_ms)?;
        let enforce_balance =
            Self::parse_bool_from_env(Self::ENV_ENFORCE_BALANCE, defaults.enforce_balance)?;
        let embedding_api_base = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_BASE);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_KEY);
        let embedding_dim =
            Self::parse_u64_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim as u64)?
                as usize;
        let embedding_timeout_ms = Self::parse_u64_from_env(
            Self::ENV_EMBEDDING_TIMEOUT_MS,
            defaults.embedding_timeout_ms,
        )?;

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            collection,
            retrieval_k,
            llm_model,
            rerank_timeout_ms,
            enforce_balance,
            embedding_api_base,
            embedding_model,
            embedding_api_key,
            embedding_dim,
            embedding_timeout_ms,
        })
    }

    /// Validates basic invariants (does not contact any collaborator).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collection.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_COLLECTION,
            });
        }
        if self.llm_model.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_LLM_MODEL,
            });
        }
        if self.retrieval_k == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_RETRIEVAL_K,
            });
        }
        if self.rerank_timeout_ms == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_RERANK_TIMEOUT_MS,
            });
        }
        if self.embedding_dim == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_EMBEDDING_DIM,
            });
        }
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Reranker settings derived from this configuration.
    pub fn reranker_config(&self) -> RerankerConfig {
        RerankerConfig::new(&self.llm_model)
            .with_timeout(Duration::from_millis(self.rerank_timeout_ms))
            .with_enforce_balance(self.enforce_balance)
    }

    /// Embedder settings derived from this configuration.
    pub fn embedding_config(&self) -> EmbeddingConfig {
        match &self.embedding_api_base {
            Some(api_base) => EmbeddingConfig::http(api_base, &self.embedding_model)
                .with_api_key(self.embedding_api_key.clone())
                .with_dimension(self.embedding_dim)
                .with_timeout(Duration::from_millis(self.embedding_timeout_ms)),
            None => EmbeddingConfig::stub().with_dimension(self.embedding_dim),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" | "" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }
}
