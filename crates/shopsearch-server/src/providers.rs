use shopsearch_core::AppConfig;
use shopsearch_providers::{AmazonClient, EbayClient, ProviderError, WalmartClient};

/// The set of upstream clients this process could construct from its
/// configuration. A `None` slot means the provider's configuration is
/// absent; the affected routes answer with a configuration error while the
/// rest of the API stays available.
pub struct Providers {
    pub amazon: Option<AmazonClient>,
    pub walmart: Option<WalmartClient>,
    pub ebay: Option<EbayClient>,
}

/// Builds a client for every provider whose configuration is present.
///
/// # Errors
///
/// Returns [`ProviderError`] when a present configuration value is unusable
/// (an invalid Walmart base URL, or a client that cannot be constructed).
pub fn build_providers(config: &AppConfig) -> Result<Providers, ProviderError> {
    let amazon = config
        .scraper_api_key
        .as_deref()
        .map(|key| {
            AmazonClient::new(
                key,
                config.affiliate.clone(),
                config.request_timeout_secs,
                &config.user_agent,
            )
        })
        .transpose()?;

    let walmart = match (
        config.scraper_api_key.as_deref(),
        config.walmart_structured_url.as_deref(),
    ) {
        (Some(key), Some(base_url)) => Some(WalmartClient::new(
            base_url,
            key,
            config.request_timeout_secs,
            &config.user_agent,
        )?),
        _ => None,
    };

    let ebay = config
        .ebay_oauth_token
        .as_deref()
        .map(|token| {
            EbayClient::new(
                token,
                config.affiliate.clone(),
                config.request_timeout_secs,
                &config.user_agent,
            )
        })
        .transpose()?;

    Ok(Providers {
        amazon,
        walmart,
        ebay,
    })
}
