//! HTTP gateway (Axum): `GET /health` and `POST /recommend`.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::recommend_handler;
pub use payload::{AssessmentItem, RecommendRequest, RecommendResponse};
pub use state::AppState;

use crate::catalog::CatalogStore;
use crate::rerank::LanguageModel;

/// Response header naming the path that produced the body.
pub const SHORTLIST_STATUS_HEADER: &str = "X-Shortlist-Status";

pub const SHORTLIST_STATUS_HEALTHY: &str = "healthy";

pub fn create_router_with_state<S, M>(state: AppState<S, M>) -> Router
where
    S: CatalogStore + 'static,
    M: LanguageModel + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/recommend", post(recommend_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        SHORTLIST_STATUS_HEADER,
        HeaderValue::from_static(SHORTLIST_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse {
            status: SHORTLIST_STATUS_HEALTHY,
        }),
    )
        .into_response()
}
