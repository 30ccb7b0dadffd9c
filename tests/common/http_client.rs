use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use shortlist::gateway::{RecommendResponse, SHORTLIST_STATUS_HEADER};

#[derive(Debug, Deserialize)]
pub struct HealthBody {
    pub status: String,
}

pub struct RawResponse {
    pub status: StatusCode,
    pub shortlist_status: Option<String>,
    pub body: Value,
}

pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn health(&self) -> Result<HealthBody, reqwest::Error> {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Successful recommendation plus its `X-Shortlist-Status` value.
    pub async fn recommend(&self, query: &str) -> anyhow::Result<(RecommendResponse, String)> {
        let raw = self.post_raw(serde_json::json!({ "query": query })).await?;
        anyhow::ensure!(raw.status.is_success(), "status {}", raw.status);
        let status = raw.shortlist_status.unwrap_or_default();
        Ok((serde_json::from_value(raw.body)?, status))
    }

    pub async fn post_raw(&self, body: Value) -> Result<RawResponse, reqwest::Error> {
        let response = self
            .client
            .post(format!("{}/recommend", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let shortlist_status = response
            .headers()
            .get(SHORTLIST_STATUS_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.json().await?;

        Ok(RawResponse {
            status,
            shortlist_status,
            body,
        })
    }
}
