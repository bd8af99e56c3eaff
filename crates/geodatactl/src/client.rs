//! HTTP client for a running geodata server.

use anyhow::Result;
use reqwest::Client;

use geodata_server::db::models::CompanyResponse;
use geodata_server::handlers::health::ApiHealthResponse;

/// Client for the company data API.
pub struct ServerClient {
    server_url: String,
    client: Client,
}

impl ServerClient {
    pub fn new(server_url: String) -> Self {
        Self {
            server_url,
            client: Client::new(),
        }
    }

    /// Retrieve company data for a CRN.
    pub async fn retrieve_company(&self, crn: &str, groups: &str) -> Result<CompanyResponse> {
        let response = self
            .client
            .get(format!("{}/v2/company/{}", self.server_url, crn))
            .query(&[("groups", groups)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("server returned {status}: {body}");
        }

        Ok(response.json().await?)
    }

    /// Fetch the detailed health report.
    ///
    /// The body parses on both the healthy and the 503 path, so the caller
    /// sees the reported status either way.
    pub async fn health(&self) -> Result<ApiHealthResponse> {
        let response = self
            .client
            .get(format!("{}/api/health", self.server_url))
            .send()
            .await?;

        Ok(response.json().await?)
    }
}
