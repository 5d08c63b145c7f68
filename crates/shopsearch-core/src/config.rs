use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::affiliate::AffiliateTags;
use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a present value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a present value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed. Provider credentials stay optional here; the routes that need them
/// report the missing variable at request time.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let port = parse_u16("PORT", "4000")?;
    let bind_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
    let log_level = or_default("SHOPSEARCH_LOG_LEVEL", "info");

    let scraper_api_key = lookup("SCRAPER_API_KEY").ok();
    let walmart_structured_url = lookup("WALMART_STRUCTURED_URL").ok();
    let ebay_oauth_token = lookup("EBAY_OAUTH_TOKEN").ok();

    let affiliate = AffiliateTags {
        amazon_tag: lookup("AMAZON_TAG").ok(),
        epn_campaign_id: lookup("EPN_CAMPAIGN_ID").ok(),
        epn_custom_id: lookup("EPN_CUSTOM_ID").ok(),
    };

    let request_timeout_secs = parse_u64("SHOPSEARCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPSEARCH_USER_AGENT", "shopsearch/0.1 (product-search)");

    Ok(AppConfig {
        bind_addr,
        log_level,
        scraper_api_key,
        walmart_structured_url,
        ebay_oauth_token,
        affiliate,
        request_timeout_secs,
        user_agent,
    })
}
