//! Assessment catalog: canonical records, the record normalizer, the store
//! capability the retriever queries, and ingestion into that store.

pub mod error;
pub mod ingest;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;
pub mod normalize;
pub mod store;


pub use error::{CatalogError, IngestError, NormalizeError};
pub use ingest::{
    CatalogIngestor, IngestReport, LoadedCatalog, document_text, load_catalog, normalize_entries,
};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCatalogStore;
pub use model::{AssessmentRecord, Support};
pub use normalize::normalize;
pub use store::{CatalogHit, CatalogStore, DOCUMENT_KEY, VectorCatalog};
