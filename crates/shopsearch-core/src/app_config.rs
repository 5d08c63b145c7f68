use std::net::SocketAddr;

use crate::affiliate::AffiliateTags;

/// Process-wide configuration, read once at startup and immutable thereafter.
///
/// Provider credentials are optional: the server starts without them and the
/// routes that need a missing value answer with a configuration error.
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Key for the structured Amazon/Walmart scraping proxy.
    pub scraper_api_key: Option<String>,
    /// Base URL of the structured Walmart search endpoint.
    pub walmart_structured_url: Option<String>,
    /// Bearer token for the eBay Browse API.
    pub ebay_oauth_token: Option<String>,
    pub affiliate: AffiliateTags,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "scraper_api_key",
                &self.scraper_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("walmart_structured_url", &self.walmart_structured_url)
            .field(
                "ebay_oauth_token",
                &self.ebay_oauth_token.as_ref().map(|_| "[redacted]"),
            )
            .field("affiliate", &self.affiliate)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
