//! Market data provider trait definitions.
//!
//! Each trait covers one kind of external data the valuation engine needs.
//! The engine never calls these synchronously during a valuation; refresh
//! jobs call them on a schedule and cache the results.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{FearGreedIndex, LatestRates, PricePoint};

/// Source of the latest FX rate table (foreign units per 1 USD).
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use assetwise_market_data::{ExchangeRateProvider, LatestRates, MarketDataError};
///
/// struct FixedRates;
///
/// #[async_trait]
/// impl ExchangeRateProvider for FixedRates {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_latest_rates(&self) -> Result<LatestRates, MarketDataError> {
///         Ok(LatestRates::new("FIXED").with_rate("EUR", rust_decimal::Decimal::ONE))
///     }
/// }
/// ```
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    async fn get_latest_rates(&self) -> Result<LatestRates, MarketDataError>;
}

/// Source of the daily closing price history of the volatile reference asset.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    fn id(&self) -> &'static str;

    /// Fetch the daily closes, oldest first when the provider allows it.
    ///
    /// Consumers must still sort by timestamp (see [`PricePoint::closes`]).
    async fn get_price_history(&self) -> Result<Vec<PricePoint>, MarketDataError>;
}

/// Source of market sentiment readings.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    fn id(&self) -> &'static str;

    async fn get_fear_greed_index(&self) -> Result<FearGreedIndex, MarketDataError>;
}
