//! @ai:module:intent HTTP client for a running telemetry API
//! @ai:module:layer infrastructure
//! @ai:module:public_api ApiClient
//! @ai:module:stateless true

use crate::catalog::{ExecutionDraft, ExecutionRecord};
use crate::stats::{CatalogCount, CategoryStatsEntry};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// @ai:intent Thin typed wrapper over the telemetry HTTP API
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// @ai:intent Create a client for the API rooted at `base_url`
    /// @ai:effects pure
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// @ai:intent Decode a JSON body, surfacing the server's error text on failure
    /// @ai:effects network
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, error_text);
        }

        response
            .json()
            .await
            .context("Failed to parse API response")
    }

    /// @ai:intent Fetch per-category performance statistics
    /// @ai:effects network
    pub async fn performance_stats(&self, category: Option<&str>) -> Result<Vec<CategoryStatsEntry>> {
        let mut request = self.client.get(self.url("/executions/performance_stats"));

        if let Some(category) = category {
            request = request.query(&[("type", category)]);
        }

        let response = request
            .send()
            .await
            .context("Failed to request performance stats")?;

        Self::decode(response).await
    }

    /// @ai:intent Fetch per-category algorithm counts
    /// @ai:effects network
    pub async fn catalog_counts(&self) -> Result<Vec<CatalogCount>> {
        let response = self
            .client
            .get(self.url("/algorithms/stats"))
            .send()
            .await
            .context("Failed to request catalog counts")?;

        Self::decode(response).await
    }

    /// @ai:intent Submit one execution record
    /// @ai:effects network
    pub async fn record_execution(&self, draft: &ExecutionDraft) -> Result<ExecutionRecord> {
        let response = self
            .client
            .post(self.url("/executions/record_execution"))
            .json(draft)
            .send()
            .await
            .context("Failed to submit execution")?;

        Self::decode(response).await
    }
}
