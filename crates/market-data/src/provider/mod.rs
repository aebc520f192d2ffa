//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - One trait per kind of data the engine consumes (rates, price history, sentiment)
//! - Concrete provider implementations (Kraken, currencyapi.com, alternative.me)
//!
//! Providers only fetch and decode. Caching, scheduling and fallback policy
//! live in the core crate.

mod http;
mod traits;

pub mod alternative_me;
pub mod currency_api;
pub mod kraken;

pub use traits::{ExchangeRateProvider, PriceHistoryProvider, SentimentProvider};
