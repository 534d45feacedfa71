//! HTTP adapter for the back-office API.
//!
//! - `GET  {base}/requests?dateFrom=..&dateTo=..&project=..&status=..`
//! - `GET  {base}/requests/{id}`
//! - `POST {base}/requests/decision` with `{ "Ids": [...], "Approved": bool }`

use std::time::Duration;

use async_trait::async_trait;
use kitgrid_core::api::{
    BatchDecision, DecisionGateway, DecisionResponse, ListFilter, RecordSource,
};
use kitgrid_core::config::ApiConfig;
use kitgrid_core::error::{GridError, Result};
use kitgrid_core::record::{Record, RecordId};
use reqwest::StatusCode;

pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GridError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Builds a client from `[api]`; fails if no base URL is configured.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| GridError::config("api.base_url is not set"))?;
        Self::new(base_url, Duration::from_secs(config.timeout_secs))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn network(operation: &str) -> impl Fn(reqwest::Error) -> GridError + '_ {
    move |e| GridError::network(operation, e.to_string())
}

#[async_trait]
impl RecordSource for HttpApiClient {
    async fn fetch(&self, filter: &ListFilter) -> Result<Vec<Record>> {
        let response = self
            .client
            .get(self.url("requests"))
            .query(&filter.query_pairs())
            .send()
            .await
            .map_err(network("list fetch"))?
            .error_for_status()
            .map_err(network("list fetch"))?;

        let records: Vec<Record> = response.json().await.map_err(network("list fetch"))?;
        tracing::debug!("[HttpApiClient] Fetched {} record(s)", records.len());
        Ok(records)
    }

    async fn fetch_detail(&self, id: RecordId) -> Result<Record> {
        let response = self
            .client
            .get(self.url(&format!("requests/{}", id)))
            .send()
            .await
            .map_err(network("detail fetch"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GridError::not_found("Record", id));
        }

        response
            .error_for_status()
            .map_err(network("detail fetch"))?
            .json()
            .await
            .map_err(network("detail fetch"))
    }
}

#[async_trait]
impl DecisionGateway for HttpApiClient {
    async fn submit(&self, batch: &BatchDecision) -> Result<()> {
        let response = self
            .client
            .post(self.url("requests/decision"))
            .json(batch)
            .send()
            .await
            .map_err(network("submit decision"))?
            .error_for_status()
            .map_err(network("submit decision"))?;

        let body: DecisionResponse = response.json().await.map_err(network("submit decision"))?;
        body.into_result()
    }
}
