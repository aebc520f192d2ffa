use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single closing price observation for the volatile reference asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Start of the candle the close belongs to
    pub timestamp: DateTime<Utc>,

    /// Closing price in USD
    pub close: Decimal,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: Decimal) -> Self {
        Self { timestamp, close }
    }

    /// Extracts the chronologically ordered closes from a price history.
    ///
    /// The input is sorted by timestamp first so callers never depend on the
    /// provider's ordering.
    pub fn closes(points: &[PricePoint]) -> Vec<Decimal> {
        let mut sorted: Vec<&PricePoint> = points.iter().collect();
        sorted.sort_by_key(|p| p.timestamp);
        sorted.into_iter().map(|p| p.close).collect()
    }
}
