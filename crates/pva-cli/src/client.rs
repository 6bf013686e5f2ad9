//! HTTP client for the audit service API.

use anyhow::{Context, Result};
use reqwest::Client;

use pva_types::{ChangeEntry, RollbackRequest, TagRequest};

/// JSON client over the audit service endpoints.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new API client for the given `host:port` address.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(server_addr: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: format!("http://{server_addr}"),
        })
    }

    /// `GET /changes` with the supplied filters.
    pub async fn changes(
        &self,
        filters: &[(&'static str, Option<String>)],
    ) -> Result<Vec<ChangeEntry>> {
        let url = format!("{}/changes", self.base_url);
        let query: Vec<(&str, String)> = filters
            .iter()
            .filter_map(|(key, value)| value.clone().map(|v| (*key, v)))
            .collect();

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .context("Failed to send request")?;

        if response.status().is_success() {
            response.json().await.context("Failed to parse response")
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({status}): {body}")
        }
    }

    /// `POST /tag`.
    pub async fn tag(&self, request: &TagRequest) -> Result<String> {
        self.post_text("/tag", request).await
    }

    /// `POST /rollback`.
    pub async fn rollback(&self, request: &RollbackRequest) -> Result<String> {
        self.post_text("/rollback", request).await
    }

    async fn post_text<T: serde::Serialize>(&self, path: &str, request: &T) -> Result<String> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_success() {
            Ok(body)
        } else {
            anyhow::bail!("API error ({status}): {body}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_http() {
        let client = ApiClient::new("localhost:8080").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
