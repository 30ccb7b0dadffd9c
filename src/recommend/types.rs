use crate::catalog::AssessmentRecord;
use crate::rerank::RerankStatus;

/// Which path produced a recommendation; surfaced as `X-Shortlist-Status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationStatus {
    /// Model selection.
    Reranked,
    /// Tier-1 fallback.
    FallbackModelFailure,
    /// Tier-2 fallback.
    FallbackEmptySelection,
    /// Retrieval produced nothing; the model was not called.
    NoCandidates,
}

impl RecommendationStatus {
    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            RecommendationStatus::Reranked => "RERANKED",
            RecommendationStatus::FallbackModelFailure => "FALLBACK_MODEL_FAILURE",
            RecommendationStatus::FallbackEmptySelection => "FALLBACK_EMPTY_SELECTION",
            RecommendationStatus::NoCandidates => "NO_CANDIDATES",
        }
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            RecommendationStatus::FallbackModelFailure
                | RecommendationStatus::FallbackEmptySelection
        )
    }
}

impl std::fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}

impl From<RerankStatus> for RecommendationStatus {
    fn from(status: RerankStatus) -> Self {
        match status {
            RerankStatus::Reranked => RecommendationStatus::Reranked,
            RerankStatus::ModelFailure => RecommendationStatus::FallbackModelFailure,
            RerankStatus::EmptySelection => RecommendationStatus::FallbackEmptySelection,
        }
    }
}

/// Ordered result of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub records: Vec<AssessmentRecord>,
    pub status: RecommendationStatus,
}

impl Recommendation {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            status: RecommendationStatus::NoCandidates,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
