//! Cross-cutting, shared constants.
//!
//! Pipeline sizes live here so the retriever, reranker and gateway agree on them.
//! Prefer the config structs for anything an operator may want to tune at runtime.

/// Breadth of recall for one retrieval batch.
pub const DEFAULT_RETRIEVAL_K: u64 = 25;

/// Smallest selection the reranker is asked for.
pub const MIN_SELECTION: usize = 5;

/// Largest selection the reranker is asked for (and the cap applied to its answer).
pub const MAX_SELECTION: usize = 10;

/// Tier-1 fallback length: the model failed outright.
pub const BROAD_FALLBACK_LEN: usize = 10;

/// Tier-2 fallback length: the model answered but nothing it picked was valid.
pub const NARROW_FALLBACK_LEN: usize = 5;

/// Upper bound on stored/returned descriptions, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Description preview length sent to the reranker per candidate, in characters.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Sentinel test-type label for entries without a usable category.
pub const UNKNOWN_TEST_TYPE: &str = "Unknown";

/// Bounded wait on the language-model call.
pub const DEFAULT_RERANK_TIMEOUT_MS: u64 = 20_000;

/// Default embedding dimension (matches MiniLM-class sentence encoders).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

pub const DEFAULT_EMBEDDING_DIM_U64: u64 = DEFAULT_EMBEDDING_DIM as u64;
