//! Affiliate URL tagging for outbound product links.
//!
//! Tagging is best-effort: when the relevant configuration is unset, or the
//! input does not parse as a URL, the input is returned unchanged. A search
//! result never fails because a link could not be monetized.

use url::Url;

/// eBay Partner Network rotation id for ebay.com web links.
const EPN_ROTATION_ID: &str = "711-53200-19255-0";

/// Affiliate identifiers read once from configuration.
#[derive(Debug, Clone, Default)]
pub struct AffiliateTags {
    pub amazon_tag: Option<String>,
    pub epn_campaign_id: Option<String>,
    pub epn_custom_id: Option<String>,
}

impl AffiliateTags {
    /// Appends the Amazon Associates `tag` parameter to a product URL.
    #[must_use]
    pub fn tag_amazon(&self, raw_url: &str) -> String {
        let Some(tag) = self.amazon_tag.as_deref() else {
            return raw_url.to_owned();
        };
        append_params(raw_url, &format!("tag={tag}"))
    }

    /// Appends eBay Partner Network tracking parameters to a product URL.
    ///
    /// Requires `epn_campaign_id`; `epn_custom_id` is emitted empty when
    /// unset.
    #[must_use]
    pub fn tag_ebay(&self, raw_url: &str) -> String {
        let Some(campid) = self.epn_campaign_id.as_deref() else {
            return raw_url.to_owned();
        };
        let customid = self.epn_custom_id.as_deref().unwrap_or("");
        append_params(
            raw_url,
            &format!("campid={campid}&customid={customid}&mkcid=1&mkrid={EPN_ROTATION_ID}"),
        )
    }
}

/// Appends `params` with `?` when the URL has no query string yet, `&`
/// otherwise. Returns the input unchanged when it is not a well-formed URL.
fn append_params(raw_url: &str, params: &str) -> String {
    if Url::parse(raw_url).is_err() {
        return raw_url.to_owned();
    }
    let separator = if raw_url.contains('?') { '&' } else { '?' };
    format!("{raw_url}{separator}{params}")
}
