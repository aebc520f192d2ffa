//! Shared HTTP plumbing for the providers.

use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

use crate::errors::MarketDataError;

/// Default HTTP request timeout
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) fn build_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Send a request and return the body of a successful response.
///
/// Maps transport and HTTP status failures onto [`MarketDataError`] so that
/// every provider classifies them the same way.
pub(crate) async fn fetch_text(
    provider: &str,
    request: RequestBuilder,
) -> Result<String, MarketDataError> {
    debug!("{} request", provider);

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            MarketDataError::Timeout {
                provider: provider.to_string(),
            }
        } else {
            MarketDataError::ProviderError {
                provider: provider.to_string(),
                message: format!("Request failed: {}", e),
            }
        }
    })?;

    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::RateLimited {
            provider: provider.to_string(),
        });
    }

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: "Invalid or missing API key".to_string(),
        });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: format!("HTTP {} - {}", status, body),
        });
    }

    response
        .text()
        .await
        .map_err(|e| MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: format!("Failed to read response: {}", e),
        })
}
