use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::catalog::CatalogStore;
use crate::gateway::SHORTLIST_STATUS_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{RecommendRequest, RecommendResponse};
use crate::gateway::state::AppState;
use crate::rerank::LanguageModel;

#[instrument(skip(state, payload))]
pub async fn recommend_handler<S, M>(
    State(state): State<AppState<S, M>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, GatewayError>
where
    S: CatalogStore + 'static,
    M: LanguageModel + 'static,
{
    let Json(body) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let request = parse_request(&body)?;
    debug!(query_len = request.query.len(), "Processing recommendation request");

    let recommendation = state.recommender.recommend(&request.query).await;

    let mut headers = HeaderMap::new();
    headers.insert(
        SHORTLIST_STATUS_HEADER,
        HeaderValue::from_static(recommendation.status.as_header_value()),
    );

    Ok((
        StatusCode::OK,
        headers,
        Json(RecommendResponse::from_records(recommendation.records)),
    )
        .into_response())
}

/// The query must be a present, non-blank string.
pub(crate) fn parse_request(body: &Value) -> Result<RecommendRequest, GatewayError> {
    let query = match body.get("query") {
        Some(Value::String(query)) => query,
        Some(_) => {
            return Err(GatewayError::InvalidRequest(
                "field `query` must be a string".to_string(),
            ));
        }
        None => {
            return Err(GatewayError::InvalidRequest(
                "missing field `query`".to_string(),
            ));
        }
    };

    if query.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "field `query` must not be blank".to_string(),
        ));
    }

    Ok(RecommendRequest {
        query: query.clone(),
    })
}
