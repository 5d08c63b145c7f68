//! Combined multi-provider search.
//!
//! Fans one query out to every configured provider concurrently and merges
//! the outcomes into a single [`SearchResult`]. Merge order is fixed by
//! provider priority (Amazon, then Walmart, then eBay), not relevance.
//!
//! Failure policy: provider outcomes are isolated. A failed provider
//! contributes an error marker in `bySource` and no products; the raw
//! failure is logged here and never reaches the client. Only when every
//! dispatched provider fails does the whole operation fail.

use serde::Serialize;

use shopsearch_core::{Product, Source};

use crate::amazon::AmazonClient;
use crate::ebay::EbayClient;
use crate::error::ProviderError;
use crate::walmart::WalmartClient;

/// Outcome column for one provider in the combined envelope: a result count
/// on success, an error marker when the provider failed.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SourceTally {
    Count(usize),
    Failed { error: String },
}

impl SourceTally {
    fn is_failed(&self) -> bool {
        matches!(self, SourceTally::Failed { .. })
    }
}

/// Per-provider outcome map. `ebay` is omitted from the wire entirely when
/// eBay is not configured, keeping the two-provider envelope shape.
#[derive(Debug, Serialize)]
pub struct BySource {
    pub amazon: SourceTally,
    pub walmart: SourceTally,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebay: Option<SourceTally>,
}

/// Envelope returned by the combined search endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub query: String,
    pub total: usize,
    pub products: Vec<Product>,
    pub by_source: BySource,
}

/// Dispatches Amazon, Walmart, and (when configured) eBay concurrently and
/// merges their normalized results in fixed provider order.
///
/// # Errors
///
/// Returns the first provider's error only when every dispatched provider
/// failed; any partial success produces an `Ok` result with error markers
/// for the failed providers.
pub async fn combined_search(
    amazon: &AmazonClient,
    walmart: &WalmartClient,
    ebay: Option<&EbayClient>,
    query: &str,
) -> Result<SearchResult, ProviderError> {
    let ebay_search = async {
        match ebay {
            Some(client) => Some(client.search(query).await),
            None => None,
        }
    };

    let (amazon_result, walmart_result, ebay_result) =
        tokio::join!(amazon.search(query), walmart.search(query), ebay_search);

    let mut products = Vec::new();
    let mut first_error = None;

    let amazon_tally = tally(
        Source::Amazon,
        amazon_result,
        &mut products,
        &mut first_error,
        query,
    );
    let walmart_tally = tally(
        Source::Walmart,
        walmart_result,
        &mut products,
        &mut first_error,
        query,
    );
    let ebay_tally = ebay_result
        .map(|result| tally(Source::Ebay, result, &mut products, &mut first_error, query));

    let all_failed = amazon_tally.is_failed()
        && walmart_tally.is_failed()
        && ebay_tally.as_ref().is_none_or(SourceTally::is_failed);
    if all_failed {
        if let Some(error) = first_error {
            return Err(error);
        }
    }

    Ok(SearchResult {
        query: query.to_owned(),
        total: products.len(),
        products,
        by_source: BySource {
            amazon: amazon_tally,
            walmart: walmart_tally,
            ebay: ebay_tally,
        },
    })
}

/// Folds one provider outcome into the merged product list, recording the
/// first error for the all-failed case.
fn tally(
    source: Source,
    result: Result<Vec<Product>, ProviderError>,
    products: &mut Vec<Product>,
    first_error: &mut Option<ProviderError>,
    query: &str,
) -> SourceTally {
    match result {
        Ok(items) => {
            let count = items.len();
            products.extend(items);
            SourceTally::Count(count)
        }
        Err(error) => {
            tracing::warn!(
                provider = source.as_str(),
                query,
                error = %error,
                "provider search failed"
            );
            if first_error.is_none() {
                *first_error = Some(error);
            }
            SourceTally::Failed {
                error: format!("{source} search failed"),
            }
        }
    }
}
