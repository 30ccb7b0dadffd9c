use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::types::Candidate;
use crate::catalog::{CatalogHit, CatalogStore, NormalizeError, normalize};

pub struct CandidateRetriever<S> {
    store: S,
}

impl<S: CatalogStore> CandidateRetriever<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns up to `k` candidates in store order, or an empty batch on any failure.
    ///
    /// A store error and a batch with malformed metadata both yield `[]`: the
    /// downstream stages degrade to an empty answer rather than an error.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn retrieve(&self, query: &str, k: u64) -> Vec<Candidate> {
        let hits = match self.store.query(query, k).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "Catalog query failed, returning no candidates");
                return Vec::new();
            }
        };

        match to_candidates(hits, k) {
            Ok(candidates) => {
                debug!(count = candidates.len(), "Retrieved candidates");
                candidates
            }
            Err((position, e)) => {
                warn!(position, error = %e, "Catalog returned malformed metadata, returning no candidates");
                Vec::new()
            }
        }
    }
}

fn to_candidates(
    hits: Vec<CatalogHit>,
    k: u64,
) -> Result<Vec<Candidate>, (usize, NormalizeError)> {
    let limit = usize::try_from(k).unwrap_or(usize::MAX);
    hits.into_iter()
        .take(limit)
        .enumerate()
        .map(|(position, hit)| {
            let CatalogHit {
                score,
                document,
                mut metadata,
            } = hit;

            if !metadata.contains_key("description")
                && let Some(document) = document
            {
                metadata.insert("description".to_string(), Value::String(document));
            }

            normalize(&metadata)
                .map(|record| Candidate::new(position, score, record))
                .map_err(|e| (position, e))
        })
        .collect()
}
