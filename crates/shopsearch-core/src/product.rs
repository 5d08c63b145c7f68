//! The canonical, provider-agnostic product record.
//!
//! Every adapter maps its upstream's idiosyncratic shape into [`Product`].
//! The full field set is serialized for every source (unset values become
//! `null` or the documented default, never omitted), so consumers never have
//! to branch on which marketplace a record came from.

use serde::Serialize;

/// The marketplace a product record was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Amazon,
    Walmart,
    Ebay,
}

impl Source {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Amazon => "amazon",
            Source::Walmart => "walmart",
            Source::Ebay => "ebay",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized search hit.
///
/// Constructed fresh per request from a single upstream response item and
/// discarded once the HTTP response is sent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub source: Source,
    /// Provider-native identifier (ASIN, item id); `None` when absent upstream.
    pub id: Option<String>,
    pub title: String,
    /// Product page URL, affiliate-tagged where the source supports it.
    pub url: String,
    pub image: Option<String>,
    /// `None` when the upstream price is missing or not numeric.
    pub price: Option<f64>,
    /// Defaults to `"$"` when the upstream omits a currency.
    pub price_currency: String,
    pub stars: Option<f64>,
    pub review_count: u64,
    /// Walmart-specific; `None` for the other sources.
    pub brand: Option<String>,
    /// Walmart-specific; `None` for the other sources.
    pub seller: Option<String>,
    /// Walmart-specific; `None` for the other sources.
    pub availability: Option<String>,
}
