//! Assetwise Market Data Crate
//!
//! Fetches the external inputs of the valuation engine:
//!
//! - latest FX rates quoted per 1 USD ([`CurrencyApiProvider`])
//! - daily BTC closing prices ([`KrakenProvider`])
//! - the Crypto Fear & Greed index ([`AlternativeMeProvider`])
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +---------------------+     +-----------------+
//! |  Refresh jobs    | --> |  Provider traits    | --> |  HTTP provider  |
//! |  (core crate)    |     |  (this crate)       |     |  (Kraken, ...)  |
//! +------------------+     +---------------------+     +-----------------+
//!          |
//!          v
//!   cached RateTable / RiskFactor read by the valuation pass
//! ```
//!
//! Providers decode payloads with exact decimal parsing; no floating point
//! value is used for a price or a rate.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use models::{FearGreedIndex, LatestRates, PricePoint};

pub use provider::alternative_me::AlternativeMeProvider;
pub use provider::currency_api::CurrencyApiProvider;
pub use provider::kraken::KrakenProvider;
pub use provider::{ExchangeRateProvider, PriceHistoryProvider, SentimentProvider};
