use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use super::error::CatalogError;
use crate::embedding::TextEmbedder;
use crate::vectordb::{SearchResult, VectorDbClient};

/// Payload key holding the text that was embedded for an entry.
pub const DOCUMENT_KEY: &str = "document";

/// One nearest-neighbour hit with its raw (un-normalised) metadata.
#[derive(Debug, Clone)]
pub struct CatalogHit {
    pub score: f32,
    pub document: Option<String>,
    pub metadata: Map<String, Value>,
}

impl CatalogHit {
    pub fn from_search_result(result: SearchResult) -> Self {
        let mut metadata = result.payload;
        let document = match metadata.remove(DOCUMENT_KEY) {
            Some(Value::String(text)) => Some(text),
            _ => None,
        };

        Self {
            score: result.score,
            document,
            metadata,
        }
    }
}

/// Read-only similarity search over the assessment catalog.
///
/// Implementations return at most `limit` hits, best first.
pub trait CatalogStore: Send + Sync {
    fn query(
        &self,
        text: &str,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<CatalogHit>, CatalogError>> + Send;
}

impl<T: CatalogStore> CatalogStore for Arc<T> {
    fn query(
        &self,
        text: &str,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<CatalogHit>, CatalogError>> + Send {
        (**self).query(text, limit)
    }
}

/// Catalog store backed by an embedder and a vector collection.
pub struct VectorCatalog<V> {
    embedder: TextEmbedder,
    db: V,
    collection: String,
}

impl<V: VectorDbClient> VectorCatalog<V> {
    pub fn new(embedder: TextEmbedder, db: V, collection: impl Into<String>) -> Self {
        Self {
            embedder,
            db,
            collection: collection.into(),
        }
    }

    pub fn embedder(&self) -> &TextEmbedder {
        &self.embedder
    }

    pub fn db(&self) -> &V {
        &self.db
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl<V: VectorDbClient> CatalogStore for VectorCatalog<V> {
    async fn query(&self, text: &str, limit: u64) -> Result<Vec<CatalogHit>, CatalogError> {
        let vector = self.embedder.embed(text).await?;
        let results = self.db.search(&self.collection, vector, limit).await?;

        debug!(
            collection = %self.collection,
            hits = results.len(),
            "Catalog query complete"
        );

        Ok(results
            .into_iter()
            .map(CatalogHit::from_search_result)
            .collect())
    }
}
