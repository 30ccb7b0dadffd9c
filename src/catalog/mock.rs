use parking_lot::Mutex;

use super::error::CatalogError;
use super::ingest::document_text;
use super::model::AssessmentRecord;
use super::store::{CatalogHit, CatalogStore};

/// Scripted [`CatalogStore`]: fixed hits or a fixed failure, with a query log.
#[derive(Default)]
pub struct MockCatalogStore {
    hits: Vec<CatalogHit>,
    failure: Option<String>,
    queries: Mutex<Vec<(String, u64)>>,
}

impl MockCatalogStore {
    pub fn new(hits: Vec<CatalogHit>) -> Self {
        Self {
            hits,
            ..Default::default()
        }
    }

    /// Hits in the given order, with descending scores and stored-shape metadata.
    pub fn from_records(records: &[AssessmentRecord]) -> Self {
        let hits = records
            .iter()
            .enumerate()
            .map(|(i, record)| CatalogHit {
                score: 1.0 - i as f32 * 0.01,
                document: Some(document_text(record)),
                metadata: record.to_metadata(),
            })
            .collect();
        Self::new(hits)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().len()
    }

    pub fn last_query(&self) -> Option<(String, u64)> {
        self.queries.lock().last().cloned()
    }
}

impl CatalogStore for MockCatalogStore {
    async fn query(&self, text: &str, limit: u64) -> Result<Vec<CatalogHit>, CatalogError> {
        self.queries.lock().push((text.to_string(), limit));

        if let Some(ref message) = self.failure {
            return Err(CatalogError::Unavailable {
                message: message.clone(),
            });
        }

        Ok(self.hits.iter().take(limit as usize).cloned().collect())
    }
}
