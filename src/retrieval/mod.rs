//! Candidate retrieval (stage 1).
//!
//! Pulls a broad, similarity-ordered batch from the [`CatalogStore`] and wraps
//! each hit as a [`Candidate`].
//!
//! # Batch-local ids
//!
//! [`Candidate::local_id`] is the 0-based position of the hit in *this* batch.
//! It is the only handle the reranker and the language model use to refer to a
//! candidate, and it means nothing outside the request that produced it: the
//! same assessment can carry a different id in the next request. Never persist
//! it or compare it across batches.

pub mod retriever;
pub mod types;


pub use retriever::CandidateRetriever;
pub use types::Candidate;
