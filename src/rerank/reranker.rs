use tracing::{debug, info, instrument, warn};

use crate::catalog::AssessmentRecord;
use crate::retrieval::Candidate;

use super::balance::{QueryIntent, repair_balance};
use super::config::RerankerConfig;
use super::error::{LanguageModelError, RerankError};
use super::model::LanguageModel;
use super::parse::{parse_selection, validate_selection};
use super::prompt::build_prompt;

/// Which path produced a rerank result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RerankStatus {
    /// The model's valid selection.
    Reranked,
    /// Tier 1: the call failed, timed out or the reply was unparsable.
    ModelFailure,
    /// Tier 2: the reply parsed but named no id from the batch.
    EmptySelection,
}

impl RerankStatus {
    #[inline]
    pub fn is_fallback(&self) -> bool {
        !matches!(self, RerankStatus::Reranked)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RerankOutcome {
    pub records: Vec<AssessmentRecord>,
    pub status: RerankStatus,
}

/// Language-model reranking with deterministic fallback.
///
/// Makes exactly one model call per [`rerank`](Self::rerank) on a non-empty
/// batch and never returns an error: every failure maps to a fallback prefix
/// of the batch in retrieval order.
pub struct Reranker<M> {
    model: M,
    config: RerankerConfig,
}

impl<M: LanguageModel> Reranker<M> {
    pub fn new(model: M, config: RerankerConfig) -> Result<Self, RerankError> {
        config.validate()?;
        Ok(Self { model, config })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &RerankerConfig {
        &self.config
    }

    /// An empty batch returns an empty result without calling the model.
    #[instrument(skip(self, query, candidates), fields(candidates = candidates.len()))]
    pub async fn rerank(&self, query: &str, candidates: &[Candidate]) -> RerankOutcome {
        if candidates.is_empty() {
            debug!("No candidates to rerank");
            return RerankOutcome {
                records: Vec::new(),
                status: RerankStatus::EmptySelection,
            };
        }

        let ids = match self.select(query, candidates).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, fallback = self.config.broad_fallback, "Rerank failed, using retrieval order");
                return self.fallback(candidates, self.config.broad_fallback, RerankStatus::ModelFailure);
            }
        };

        let mut selection = validate_selection(&ids, candidates.len(), self.config.max_selection);
        if selection.is_empty() {
            warn!(
                returned = ids.len(),
                fallback = self.config.narrow_fallback,
                "Rerank selected no valid ids, using retrieval order"
            );
            return self.fallback(candidates, self.config.narrow_fallback, RerankStatus::EmptySelection);
        }

        if self.config.enforce_balance {
            selection = repair_balance(
                QueryIntent::detect(query),
                selection,
                candidates,
                self.config.max_selection,
            );
        }

        info!(
            returned = ids.len(),
            selected = selection.len(),
            "Reranked candidates"
        );
        RerankOutcome {
            records: selection
                .into_iter()
                .map(|i| candidates[i].record.clone())
                .collect(),
            status: RerankStatus::Reranked,
        }
    }

    async fn select(&self, query: &str, candidates: &[Candidate]) -> Result<Vec<u64>, RerankError> {
        let prompt = build_prompt(query, candidates, &self.config);

        let reply = tokio::time::timeout(self.config.timeout, self.model.complete(&prompt))
            .await
            .map_err(|_| LanguageModelError::Timeout {
                timeout: self.config.timeout,
            })??;

        parse_selection(&reply)
    }

    fn fallback(&self, candidates: &[Candidate], len: usize, status: RerankStatus) -> RerankOutcome {
        RerankOutcome {
            records: candidates
                .iter()
                .take(len)
                .map(|c| c.record.clone())
                .collect(),
            status,
        }
    }
}
