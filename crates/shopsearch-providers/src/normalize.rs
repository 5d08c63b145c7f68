//! Normalization from raw upstream shapes to [`shopsearch_core::Product`].
//!
//! This is where the three provider schemas converge: every mapping fills the
//! complete canonical field set, coercing whatever the upstream omitted to
//! `null` or the documented default. Affiliate tagging for Amazon and eBay
//! happens here, at the moment the outbound URL is chosen.

use shopsearch_core::{AffiliateTags, Product, Source};

use crate::types::{AmazonItem, EbayItemSummary, WalmartItem};

/// Default currency symbol when an upstream omits one.
const DEFAULT_CURRENCY: &str = "$";

/// Maps one Amazon proxy search hit into a canonical product.
#[must_use]
pub fn normalize_amazon_item(item: AmazonItem, tags: &AffiliateTags) -> Product {
    let (price, currency) = match item.price {
        Some(p) => (p.value, p.currency),
        None => (None, None),
    };

    Product {
        source: Source::Amazon,
        id: item.asin,
        title: item.title,
        url: tags.tag_amazon(&item.url),
        image: item.image,
        price,
        price_currency: currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
        stars: item.rating,
        review_count: item.reviews_count.unwrap_or(0),
        brand: None,
        seller: None,
        availability: None,
    }
}

/// Maps one structured Walmart search hit into a canonical product.
///
/// Walmart URLs are served untagged; no affiliate program is wired for them.
#[must_use]
pub fn normalize_walmart_item(item: WalmartItem) -> Product {
    let rating = item.rating.unwrap_or_default();

    Product {
        source: Source::Walmart,
        id: id_string(item.id),
        title: item.name,
        url: item.url,
        image: item.image,
        price: numeric_price(&item.price),
        price_currency: item
            .price_currency
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
        stars: rating.average_rating,
        review_count: rating.number_of_reviews.unwrap_or(0),
        brand: item.brand,
        seller: item.seller,
        availability: item.availability,
    }
}

/// Maps one eBay Browse item summary into a canonical product.
#[must_use]
pub fn normalize_ebay_item(item: EbayItemSummary, tags: &AffiliateTags) -> Product {
    let (price, currency) = match item.price {
        Some(p) => (p.value.and_then(|v| v.parse::<f64>().ok()), p.currency),
        None => (None, None),
    };

    Product {
        source: Source::Ebay,
        id: item.item_id,
        title: item.title,
        url: tags.tag_ebay(&item.item_web_url),
        image: item.image.and_then(|i| i.image_url),
        price,
        price_currency: currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
        stars: None,
        review_count: 0,
        brand: None,
        seller: None,
        availability: None,
    }
}

/// Keeps numeric JSON prices only; strings and anything else become `None`.
fn numeric_price(value: &serde_json::Value) -> Option<f64> {
    value.as_f64()
}

/// Accepts the string and number ids the Walmart feed alternates between.
fn id_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
