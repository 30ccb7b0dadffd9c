//! Ingestion from a catalog file through to a recommendation.

mod common;

use std::io::Write;

use tempfile::NamedTempFile;

use shortlist::catalog::{
    CatalogIngestor, CatalogStore, IngestError, Support, VectorCatalog, load_catalog,
};
use shortlist::embedding::TextEmbedder;
use shortlist::recommend::{RecommendationStatus, Recommender};
use shortlist::rerank::{RerankerConfig, ScriptedModel};
use shortlist::vectordb::MockVectorDbClient;

use common::fixtures::raw_catalog;

fn catalog_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_catalog_normalizes_and_skips() {
    let file = catalog_file(&raw_catalog().to_string());

    let loaded = load_catalog(file.path()).unwrap();

    assert_eq!(loaded.records.len(), 3);
    assert_eq!(loaded.skipped, 2);

    let java = &loaded.records[0];
    assert_eq!(java.duration, 13);
    assert_eq!(java.adaptive_support, Support::No);
    assert_eq!(java.remote_support, Support::Yes);

    let verify = &loaded.records[2];
    assert_eq!(verify.duration, 36);
    assert_eq!(verify.adaptive_support, Support::Yes);
    assert_eq!(verify.remote_support, Support::Yes);
    assert_eq!(verify.test_types, vec!["Ability & Aptitude"]);
}

#[test]
fn test_load_catalog_errors() {
    let missing = load_catalog(std::path::Path::new("/nonexistent/catalog.json"));
    assert!(matches!(missing, Err(IngestError::Read { .. })));

    let garbage = catalog_file("{ not json");
    assert!(matches!(
        load_catalog(garbage.path()),
        Err(IngestError::Parse { .. })
    ));

    let object = catalog_file(r#"{"name": "single"}"#);
    assert!(matches!(
        load_catalog(object.path()),
        Err(IngestError::NotAnArray { .. })
    ));
}

#[tokio::test]
async fn test_ingested_catalog_serves_recommendations() {
    let file = catalog_file(&raw_catalog().to_string());
    let loaded = load_catalog(file.path()).unwrap();

    let embedder = TextEmbedder::stub();
    let db = MockVectorDbClient::new();
    let count = CatalogIngestor::new(&embedder, &db, "shl_assessments")
        .ingest(&loaded.records, true)
        .await
        .unwrap();
    assert_eq!(count, 3);

    let store = VectorCatalog::new(embedder, db, "shl_assessments");
    let hits = store.query("java class design", 25).await.unwrap();
    assert_eq!(hits.len(), 3);

    let recommender = Recommender::new(
        store,
        ScriptedModel::replying("[2, 0]"),
        RerankerConfig::new("scripted"),
    )
    .unwrap();

    let result = recommender.recommend("java class design").await;

    assert_eq!(result.status, RecommendationStatus::Reranked);
    assert_eq!(result.records.len(), 2);
    assert!(
        loaded.records.contains(&result.records[0]),
        "stored records should round-trip through the store"
    );
}

#[tokio::test]
async fn test_reingest_is_idempotent_per_url() {
    let file = catalog_file(&raw_catalog().to_string());
    let loaded = load_catalog(file.path()).unwrap();
    let embedder = TextEmbedder::stub();
    let db = MockVectorDbClient::new();
    let ingestor = CatalogIngestor::new(&embedder, &db, "catalog");

    ingestor.ingest(&loaded.records, false).await.unwrap();
    ingestor.ingest(&loaded.records, false).await.unwrap();

    assert_eq!(db.point_count("catalog"), Some(3));
}
