//! Client for the structured Walmart search endpoint.
//!
//! Unlike the Amazon proxy, the base URL is itself configuration
//! (`WALMART_STRUCTURED_URL`), so the production constructor and the test
//! constructor are the same thing. Walmart product URLs are served untagged.

use reqwest::Client;
use url::Url;

use shopsearch_core::Product;

use crate::error::ProviderError;
use crate::http::{build_client, parse_base_url, request_json};
use crate::normalize::normalize_walmart_item;
use crate::types::WalmartSearchResponse;

pub struct WalmartClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl WalmartClient {
    /// Creates a client for the configured structured-search endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            api_key: api_key.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Performs one upstream search and maps `items[]` into canonical
    /// products.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] on network/TLS/timeout failure.
    /// - [`ProviderError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ProviderError::Deserialize`] if the body is not valid JSON or does
    ///   not match the expected shape.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ProviderError> {
        let url = self.build_url(query);
        let body = request_json(&self.client, url, None).await?;
        let parsed: WalmartSearchResponse =
            serde_json::from_value(body).map_err(|e| ProviderError::Deserialize {
                context: format!("walmart search(query={query})"),
                source: e,
            })?;

        Ok(parsed
            .items
            .into_iter()
            .map(normalize_walmart_item)
            .collect())
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("query", query);
        url
    }
}
