//! Qdrant vector database integration.
//!
//! The catalog store is treated as an opaque nearest-neighbour service; this
//! module only covers the handful of calls ingestion and retrieval make.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{QdrantClient, VectorDbClient};
pub use error::VectorDbError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockVectorDbClient, cosine_similarity};
pub use model::{SearchResult, VectorPoint, json_to_payload, payload_to_json};
