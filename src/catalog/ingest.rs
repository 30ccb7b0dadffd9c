//! Catalog ingestion: cleaned JSON → normalised records → embedded points.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use super::error::IngestError;
use super::model::AssessmentRecord;
use super::normalize::normalize;
use super::store::DOCUMENT_KEY;
use crate::embedding::TextEmbedder;
use crate::hashing::point_id_for_url;
use crate::vectordb::{VectorDbClient, VectorPoint};

/// Records parsed from a catalog file plus the count of entries that were rejected.
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub records: Vec<AssessmentRecord>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestReport {
    pub ingested: usize,
    pub skipped: usize,
}

/// Text embedded for an entry: name, categories and description in one line.
pub fn document_text(record: &AssessmentRecord) -> String {
    format!(
        "Assessment Name: {}. Test Type: {}. Description: {}",
        record.name,
        record.test_types.join(", "),
        record.description
    )
}

/// Reads a JSON array of raw entries and normalises each one.
pub fn load_catalog(path: &Path) -> Result<LoadedCatalog, IngestError> {
    let raw = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(entries) = value else {
        return Err(IngestError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    Ok(normalize_entries(&entries))
}

/// Normalises raw entries, dropping malformed ones and duplicate URLs (first wins).
pub fn normalize_entries(entries: &[Value]) -> LoadedCatalog {
    let mut loaded = LoadedCatalog::default();
    let mut seen_urls = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(raw) = entry.as_object() else {
            warn!(index, "Skipping catalog entry: not an object");
            loaded.skipped += 1;
            continue;
        };

        match normalize(raw) {
            Ok(record) if seen_urls.insert(record.url.clone()) => loaded.records.push(record),
            Ok(record) => {
                warn!(index, url = %record.url, "Skipping duplicate catalog entry");
                loaded.skipped += 1;
            }
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed catalog entry");
                loaded.skipped += 1;
            }
        }
    }

    loaded
}

/// Writes records into a vector collection.
pub struct CatalogIngestor<'a, V> {
    embedder: &'a TextEmbedder,
    db: &'a V,
    collection: &'a str,
}

impl<'a, V: VectorDbClient> CatalogIngestor<'a, V> {
    pub fn new(embedder: &'a TextEmbedder, db: &'a V, collection: &'a str) -> Self {
        Self {
            embedder,
            db,
            collection,
        }
    }

    /// Embeds and upserts every record. With `recreate`, the collection is dropped first.
    pub async fn ingest(
        &self,
        records: &[AssessmentRecord],
        recreate: bool,
    ) -> Result<usize, IngestError> {
        if recreate {
            info!(collection = self.collection, "Dropping existing collection");
            self.db.delete_collection(self.collection).await?;
        }

        self.db
            .ensure_collection(self.collection, self.embedder.dimension() as u64)
            .await?;

        let mut points = Vec::with_capacity(records.len());
        for record in records {
            let document = document_text(record);
            let vector =
                self.embedder
                    .embed(&document)
                    .await
                    .map_err(|source| IngestError::Embedding {
                        name: record.name.clone(),
                        source,
                    })?;

            let mut payload = record.to_metadata();
            payload.insert(DOCUMENT_KEY.to_string(), Value::String(document));

            points.push(VectorPoint::new(point_id_for_url(&record.url), vector).with_payload(payload));
        }

        let count = points.len();
        self.db.upsert_points(self.collection, points).await?;

        info!(
            collection = self.collection,
            count, "Catalog ingestion complete"
        );
        Ok(count)
    }
}
