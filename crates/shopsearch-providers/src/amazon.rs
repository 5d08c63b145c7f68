//! Client for the structured Amazon search proxy.
//!
//! The proxy exposes Amazon search results as structured JSON, authenticated
//! with an `api_key` query parameter. [`AmazonClient::search_raw`] returns the
//! payload verbatim (the raw passthrough route serves it untouched);
//! [`AmazonClient::search`] maps `results[]` into canonical products with
//! affiliate-tagged URLs.

use reqwest::Client;
use url::Url;

use shopsearch_core::{AffiliateTags, Product};

use crate::error::ProviderError;
use crate::http::{build_client, parse_base_url, request_json};
use crate::normalize::normalize_amazon_item;
use crate::types::AmazonSearchResponse;

const DEFAULT_BASE_URL: &str = "https://api.scraperapi.com/structured/amazon/search";

pub struct AmazonClient {
    client: Client,
    api_key: String,
    base_url: Url,
    tags: AffiliateTags,
}

impl AmazonClient {
    /// Creates a client pointed at the production scraping proxy.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        tags: AffiliateTags,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, tags, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        tags: AffiliateTags,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            api_key: api_key.to_owned(),
            base_url: parse_base_url(base_url)?,
            tags,
        })
    }

    /// Performs one upstream search and returns the raw JSON payload.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] on network/TLS/timeout failure.
    /// - [`ProviderError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ProviderError::Deserialize`] if the body is not valid JSON.
    pub async fn search_raw(&self, query: &str) -> Result<serde_json::Value, ProviderError> {
        let url = self.build_url(query);
        request_json(&self.client, url, None).await
    }

    /// Performs one upstream search and maps `results[]` into canonical,
    /// affiliate-tagged products.
    ///
    /// # Errors
    ///
    /// Same as [`AmazonClient::search_raw`], plus
    /// [`ProviderError::Deserialize`] when the payload does not match the
    /// expected result shape.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ProviderError> {
        let body = self.search_raw(query).await?;
        let parsed: AmazonSearchResponse =
            serde_json::from_value(body).map_err(|e| ProviderError::Deserialize {
                context: format!("amazon search(query={query})"),
                source: e,
            })?;

        Ok(parsed
            .results
            .into_iter()
            .map(|item| normalize_amazon_item(item, &self.tags))
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

#[cfg(test)]
#[path = "amazon_test.rs"]
mod amazon_test;
