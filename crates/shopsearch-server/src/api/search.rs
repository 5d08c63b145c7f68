//! Search route handlers.
//!
//! Validation order is fixed: a missing `query` is rejected before the
//! configuration check, and both before any upstream call. Upstream failures
//! are logged with their request id and mapped to the route's generic
//! message.

use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use shopsearch_core::{Product, Source};
use shopsearch_providers::{combined_search, SearchResult, WalmartClient};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    query: Option<String>,
}

/// Envelope for the raw Amazon passthrough route.
#[derive(Debug, Serialize)]
pub struct RawSearchBody {
    pub success: bool,
    pub query: String,
    pub data: serde_json::Value,
}

/// Envelope for the single-source normalized routes.
#[derive(Debug, Serialize)]
pub struct SingleSourceBody {
    pub source: Source,
    pub query: String,
    pub total: usize,
    pub products: Vec<Product>,
}

fn require_query(params: &SearchParams) -> Result<&str, ApiError> {
    match params.query.as_deref() {
        Some(query) if !query.is_empty() => Ok(query),
        _ => Err(ApiError::Validation("Missing query")),
    }
}

/// Resolves the Walmart client, naming whichever variable is actually
/// missing when it cannot be built.
fn require_walmart(state: &AppState) -> Result<&WalmartClient, ApiError> {
    if state.config.scraper_api_key.is_none() {
        return Err(ApiError::Configuration("SCRAPER_API_KEY"));
    }
    state
        .providers
        .walmart
        .as_ref()
        .ok_or(ApiError::Configuration("WALMART_STRUCTURED_URL"))
}

/// `GET /api/search/amazon`: raw upstream payload, untouched.
pub async fn amazon_raw(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<RawSearchBody>, ApiError> {
    let query = require_query(&params)?;
    let Some(amazon) = state.providers.amazon.as_ref() else {
        return Err(ApiError::Configuration("SCRAPER_API_KEY"));
    };

    match amazon.search_raw(query).await {
        Ok(data) => Ok(Json(RawSearchBody {
            success: true,
            query: query.to_owned(),
            data,
        })),
        Err(error) => {
            tracing::error!(
                request_id = %req_id.0,
                provider = "amazon",
                query,
                error = %error,
                "amazon search failed"
            );
            Err(ApiError::Upstream("Amazon API request failed"))
        }
    }
}

/// `GET /api/search/walmart-simple`: normalized Walmart results.
pub async fn walmart_simple(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SingleSourceBody>, ApiError> {
    let query = require_query(&params)?;
    let walmart = require_walmart(&state)?;

    match walmart.search(query).await {
        Ok(products) => Ok(Json(SingleSourceBody {
            source: Source::Walmart,
            query: query.to_owned(),
            total: products.len(),
            products,
        })),
        Err(error) => {
            tracing::error!(
                request_id = %req_id.0,
                provider = "walmart",
                query,
                error = %error,
                "walmart search failed"
            );
            Err(ApiError::Upstream("Walmart simple API failed"))
        }
    }
}

/// `GET /api/search/ebay`: normalized eBay Browse results.
pub async fn ebay(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SingleSourceBody>, ApiError> {
    let query = require_query(&params)?;
    let Some(ebay) = state.providers.ebay.as_ref() else {
        return Err(ApiError::Configuration("EBAY_OAUTH_TOKEN"));
    };

    match ebay.search(query).await {
        Ok(products) => Ok(Json(SingleSourceBody {
            source: Source::Ebay,
            query: query.to_owned(),
            total: products.len(),
            products,
        })),
        Err(error) => {
            tracing::error!(
                request_id = %req_id.0,
                provider = "ebay",
                query,
                error = %error,
                "ebay search failed"
            );
            Err(ApiError::Upstream("Failed to fetch eBay products."))
        }
    }
}

/// `GET /api/search`: concurrent fan-out across the configured providers.
pub async fn combined(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResult>, ApiError> {
    let query = require_query(&params)?;
    let Some(amazon) = state.providers.amazon.as_ref() else {
        return Err(ApiError::Configuration("SCRAPER_API_KEY"));
    };
    let walmart = require_walmart(&state)?;

    match combined_search(amazon, walmart, state.providers.ebay.as_ref(), query).await {
        Ok(result) => Ok(Json(result)),
        Err(error) => {
            tracing::error!(
                request_id = %req_id.0,
                query,
                error = %error,
                "combined search failed across all providers"
            );
            Err(ApiError::Upstream("Combined search failed"))
        }
    }
}
