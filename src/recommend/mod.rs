//! Recommendation orchestration: retrieval, then reranking.
//!
//! Holds no per-request state; one [`Recommender`] is shared by all requests.

pub mod types;


pub use types::{Recommendation, RecommendationStatus};

use tracing::{debug, info, instrument};

use crate::catalog::CatalogStore;
use crate::constants::DEFAULT_RETRIEVAL_K;
use crate::rerank::{LanguageModel, RerankError, Reranker, RerankerConfig};
use crate::retrieval::CandidateRetriever;

pub struct Recommender<S, M> {
    retriever: CandidateRetriever<S>,
    reranker: Reranker<M>,
    retrieval_k: u64,
}

impl<S: CatalogStore, M: LanguageModel> Recommender<S, M> {
    pub fn new(store: S, model: M, config: RerankerConfig) -> Result<Self, RerankError> {
        Ok(Self::from_parts(
            CandidateRetriever::new(store),
            Reranker::new(model, config)?,
            DEFAULT_RETRIEVAL_K,
        ))
    }

    pub fn from_parts(retriever: CandidateRetriever<S>, reranker: Reranker<M>, retrieval_k: u64) -> Self {
        Self {
            retriever,
            reranker,
            retrieval_k,
        }
    }

    pub fn with_retrieval_k(mut self, k: u64) -> Self {
        self.retrieval_k = k;
        self
    }

    pub fn retriever(&self) -> &CandidateRetriever<S> {
        &self.retriever
    }

    pub fn reranker(&self) -> &Reranker<M> {
        &self.reranker
    }

    pub fn retrieval_k(&self) -> u64 {
        self.retrieval_k
    }

    /// Never fails: backend trouble shows up as a fallback status, not an error.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn recommend(&self, query: &str) -> Recommendation {
        let candidates = self.retriever.retrieve(query, self.retrieval_k).await;
        if candidates.is_empty() {
            debug!("No candidates retrieved, skipping rerank");
            return Recommendation::empty();
        }

        let outcome = self.reranker.rerank(query, &candidates).await;
        let recommendation = Recommendation {
            records: outcome.records,
            status: outcome.status.into(),
        };

        info!(
            candidates = candidates.len(),
            returned = recommendation.len(),
            status = %recommendation.status,
            "Recommendation built"
        );
        recommendation
    }
}
