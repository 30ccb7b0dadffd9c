//! Shortlist library crate (used by the server binary and integration tests).
//!
//! Recommends assessments for a free-text query in two stages: broad vector
//! retrieval over the catalog, then a single language-model rerank that
//! falls back to retrieval order whenever the model misbehaves.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`CandidateRetriever`], [`Candidate`] - Stage 1, similarity recall
//! - [`Reranker`], [`RerankerConfig`], [`RerankOutcome`] - Stage 2, model selection with fallback
//! - [`Recommender`], [`Recommendation`], [`RecommendationStatus`] - Orchestration
//!
//! ## Catalog
//! - [`AssessmentRecord`], [`Support`] - Canonical records
//! - [`normalize`] - Record normalizer shared by ingestion and retrieval
//! - [`CatalogStore`], [`VectorCatalog`] - Similarity query capability
//! - [`CatalogIngestor`], [`load_catalog`] - Populating the store
//!
//! ## Collaborators
//! - [`LanguageModel`], [`GenaiModel`] - Reranker model
//! - [`TextEmbedder`], [`EmbeddingConfig`] - Query/document embeddings
//! - [`QdrantClient`], [`VectorDbClient`] - Vector index access
//!
//! ## Test/Mock Support
//! Test doubles ([`MockCatalogStore`], `ScriptedModel`, [`MockVectorDbClient`])
//! are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod hashing;
pub mod recommend;
pub mod rerank;
pub mod retrieval;
pub mod vectordb;

pub use catalog::{
    AssessmentRecord, CatalogError, CatalogHit, CatalogIngestor, CatalogStore, IngestError,
    IngestReport, LoadedCatalog, NormalizeError, Support, VectorCatalog, document_text,
    load_catalog, normalize,
};
#[cfg(any(test, feature = "mock"))]
pub use catalog::MockCatalogStore;

pub use config::{Config, ConfigError};
pub use embedding::{EmbeddingConfig, EmbeddingError, TextEmbedder};
pub use gateway::{
    AppState, GatewayError, SHORTLIST_STATUS_HEADER, create_router_with_state,
};
pub use hashing::{hash_to_u64, point_id_for_url};
pub use recommend::{Recommendation, RecommendationStatus, Recommender};
pub use rerank::{
    GenaiModel, LanguageModel, LanguageModelError, RerankError, RerankOutcome, RerankStatus,
    Reranker, RerankerConfig,
};
#[cfg(any(test, feature = "mock"))]
pub use rerank::{ScriptedModel, ScriptedReply};
pub use retrieval::{Candidate, CandidateRetriever};

#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockVectorDbClient;
pub use vectordb::{QdrantClient, SearchResult, VectorDbClient, VectorDbError, VectorPoint};
