//! Shared request plumbing for the provider clients.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ProviderError;

/// Builds the outbound HTTP client every provider shares the configuration
/// of: request timeout, a 10s connect timeout, and the configured
/// `User-Agent`.
///
/// # Errors
///
/// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
/// cannot be constructed.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ProviderError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Parses a base URL string into a [`Url`].
///
/// # Errors
///
/// Returns [`ProviderError::InvalidBaseUrl`] when the string does not parse.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ProviderError> {
    Url::parse(base_url).map_err(|e| ProviderError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Sends one GET request (optionally bearer-authenticated), asserts a 2xx
/// status, and parses the body as JSON. Single attempt, no retries.
///
/// # Errors
///
/// - [`ProviderError::Http`] on network/TLS/timeout failure.
/// - [`ProviderError::UnexpectedStatus`] on a non-2xx status.
/// - [`ProviderError::Deserialize`] if the body is not valid JSON.
pub(crate) async fn request_json(
    client: &Client,
    url: Url,
    bearer_token: Option<&str>,
) -> Result<serde_json::Value, ProviderError> {
    let mut request = client.get(url.clone());
    if let Some(token) = bearer_token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::UnexpectedStatus {
            status: status.as_u16(),
            url: display_url(&url),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
        context: display_url(&url),
        source: e,
    })
}

/// Renders a URL without its query string so credentials carried as query
/// parameters never end up in error messages or logs.
pub(crate) fn display_url(url: &Url) -> String {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.to_string()
}
