//! Client for the eBay Browse API item-summary search.
//!
//! Bearer-token authenticated. Results are normalized into canonical
//! products like the other providers; the Browse API carries no rating data
//! in item summaries, so `stars` is always `null` and `reviewCount` 0.

use reqwest::Client;
use url::Url;

use shopsearch_core::{AffiliateTags, Product};

use crate::error::ProviderError;
use crate::http::{build_client, parse_base_url, request_json};
use crate::normalize::normalize_ebay_item;
use crate::types::EbaySearchResponse;

const DEFAULT_BASE_URL: &str = "https://api.ebay.com/buy/browse/v1/item_summary/search";

/// Fixed page size for item-summary searches.
const PAGE_LIMIT: u32 = 20;

pub struct EbayClient {
    client: Client,
    token: String,
    base_url: Url,
    tags: AffiliateTags,
}

impl EbayClient {
    /// Creates a client pointed at the production Browse API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: &str,
        tags: AffiliateTags,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(token, tags, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        token: &str,
        tags: AffiliateTags,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            token: token.to_owned(),
            base_url: parse_base_url(base_url)?,
            tags,
        })
    }

    /// Performs one upstream search and maps `itemSummaries[]` into
    /// canonical, affiliate-tagged products.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] on network/TLS/timeout failure.
    /// - [`ProviderError::UnexpectedStatus`] on a non-2xx status (including
    ///   401 on an expired OAuth token).
    /// - [`ProviderError::Deserialize`] if the body is not valid JSON or does
    ///   not match the expected shape.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ProviderError> {
        let url = self.build_url(query);
        let body = request_json(&self.client, url, Some(&self.token)).await?;
        let parsed: EbaySearchResponse =
            serde_json::from_value(body).map_err(|e| ProviderError::Deserialize {
                context: format!("ebay search(query={query})"),
                source: e,
            })?;

        Ok(parsed
            .item_summaries
            .into_iter()
            .map(|item| normalize_ebay_item(item, &self.tags))
            .collect())
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &PAGE_LIMIT.to_string());
        url
    }
}
