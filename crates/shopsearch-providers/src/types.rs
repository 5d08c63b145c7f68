//! Raw response types for the three upstream search APIs.
//!
//! Each upstream has its own idiosyncratic shape; these structs model only
//! the fields the normalizer consumes and default everything the upstreams
//! routinely omit. See [`crate::normalize`] for the mapping into the
//! canonical [`shopsearch_core::Product`].

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Amazon (structured scraping proxy)
// ---------------------------------------------------------------------------

/// Top-level payload of the structured Amazon search: `{ "results": [...] }`.
#[derive(Debug, Deserialize)]
pub struct AmazonSearchResponse {
    #[serde(default)]
    pub results: Vec<AmazonItem>,
}

/// One Amazon search hit from the scraping proxy.
#[derive(Debug, Deserialize)]
pub struct AmazonItem {
    #[serde(default)]
    pub asin: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<AmazonPrice>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct AmazonPrice {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

// ---------------------------------------------------------------------------
// Walmart (structured search endpoint)
// ---------------------------------------------------------------------------

/// Top-level payload of the structured Walmart search: `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
pub struct WalmartSearchResponse {
    #[serde(default)]
    pub items: Vec<WalmartItem>,
}

/// One Walmart search hit.
#[derive(Debug, Deserialize)]
pub struct WalmartItem {
    /// Strings or numbers upstream; normalized to a string id.
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    /// The feed interleaves numbers with junk strings; the normalizer keeps
    /// numeric values only.
    #[serde(default)]
    pub price: serde_json::Value,
    #[serde(default)]
    pub price_currency: Option<String>,
    #[serde(default)]
    pub rating: Option<WalmartRating>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WalmartRating {
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub number_of_reviews: Option<u64>,
}

// ---------------------------------------------------------------------------
// eBay (Browse API item summary search)
// ---------------------------------------------------------------------------

/// Top-level payload of the Browse API search: `{ "itemSummaries": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbaySearchResponse {
    #[serde(default)]
    pub item_summaries: Vec<EbayItemSummary>,
}

/// One eBay item summary. The Browse API carries no rating data here, so
/// normalized eBay products have `stars: null` and `reviewCount: 0`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbayItemSummary {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub item_web_url: String,
    #[serde(default)]
    pub image: Option<EbayImage>,
    #[serde(default)]
    pub price: Option<EbayPrice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbayImage {
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EbayPrice {
    /// The Browse API returns monetary values as strings, e.g. `"19.99"`.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}
