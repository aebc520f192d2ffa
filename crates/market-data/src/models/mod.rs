//! Market data models
//!
//! This module contains the data types exchanged with providers:
//! - `price` - Closing price observations (PricePoint)
//! - `rates` - Latest FX rates quoted per 1 USD (LatestRates)
//! - `sentiment` - Fear & Greed index readings (FearGreedIndex)

mod price;
mod rates;
mod sentiment;

pub use price::PricePoint;
pub use rates::LatestRates;
pub use sentiment::FearGreedIndex;
