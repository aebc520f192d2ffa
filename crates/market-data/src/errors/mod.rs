//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while fetching rates, price history or sentiment data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider answered but returned no usable observations.
    #[error("No data returned by {provider}")]
    NoData {
        /// The provider that returned an empty payload
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (API error field, non-2xx status).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The payload could not be decoded into the expected shape.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// The provider requires an API key that was not configured.
    #[error("Missing API key for {provider}")]
    MissingApiKey {
        /// The provider needing credentials
        provider: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// ```
    /// use assetwise_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { provider: "KRAKEN".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::MissingApiKey { provider: "CURRENCY_API".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::NoData { .. }
            | Self::ProviderError { .. } => RetryClass::WithBackoff,

            Self::Network(err) if err.is_timeout() || err.is_connect() => RetryClass::WithBackoff,

            Self::ValidationFailed { .. } | Self::MissingApiKey { .. } | Self::Network(_) => {
                RetryClass::Never
            }
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}
