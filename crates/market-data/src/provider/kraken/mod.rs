//! Kraken public OHLC provider for the BTC daily price history.
//!
//! Kraken's public `OHLC` endpoint needs no API key and returns the latest
//! 720 candles for the requested interval, which covers roughly two years of
//! daily closes.
//!
//! Response shape:
//!
//! ```text
//! {"error": [], "result": {"XXBTZUSD": [[time, open, high, low, close, vwap, volume, count], ...], "last": 1700000000}}
//! ```
//!
//! Prices are JSON strings; the timestamp is an integer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, warn};

use super::http::{build_client, fetch_text};
use crate::errors::MarketDataError;
use crate::models::PricePoint;
use crate::provider::PriceHistoryProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "KRAKEN";

const BASE_URL: &str = "https://api.kraken.com/0/public/OHLC";

/// Default pair: BTC quoted in USD
const DEFAULT_PAIR: &str = "XBTUSD";

/// Daily candles
const DEFAULT_INTERVAL_MINUTES: u32 = 1440;

/// Index of the close price inside an OHLC row
const CLOSE_INDEX: usize = 4;

#[derive(Debug, Deserialize)]
struct OhlcResponse {
    error: Vec<String>,
    #[serde(default)]
    result: HashMap<String, Value>,
}

/// Kraken OHLC provider.
///
/// # Example
///
/// ```ignore
/// use assetwise_market_data::KrakenProvider;
///
/// let provider = KrakenProvider::new();
/// let history = provider.get_price_history().await?;
/// ```
pub struct KrakenProvider {
    client: Client,
    pair: String,
    interval_minutes: u32,
}

impl Default for KrakenProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl KrakenProvider {
    pub fn new() -> Self {
        Self {
            client: build_client(),
            pair: DEFAULT_PAIR.to_string(),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }

    /// Use another pair, e.g. `XBTEUR`.
    pub fn with_pair(mut self, pair: &str) -> Self {
        self.pair = pair.to_string();
        self
    }

    pub fn with_interval_minutes(mut self, interval_minutes: u32) -> Self {
        self.interval_minutes = interval_minutes;
        self
    }
}

#[async_trait]
impl PriceHistoryProvider for KrakenProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_price_history(&self) -> Result<Vec<PricePoint>, MarketDataError> {
        let interval = self.interval_minutes.to_string();
        let request = self
            .client
            .get(BASE_URL)
            .query(&[("pair", self.pair.as_str()), ("interval", interval.as_str())]);

        let body = fetch_text(PROVIDER_ID, request).await?;
        let points = parse_ohlc_response(&body)?;

        debug!(
            "Kraken: fetched {} candles for {}",
            points.len(),
            self.pair
        );
        Ok(points)
    }
}

/// Decode a Kraken OHLC payload into closing prices.
///
/// Rows with an unparsable timestamp or close are skipped with a warning; an
/// API-level error or an empty series is an error.
pub fn parse_ohlc_response(body: &str) -> Result<Vec<PricePoint>, MarketDataError> {
    let response: OhlcResponse = serde_json::from_str(body)
        .map_err(|e| MarketDataError::validation(format!("Kraken payload: {}", e)))?;

    if !response.error.is_empty() {
        return Err(MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: response.error.join(", "),
        });
    }

    // The result object holds one entry per pair plus a "last" cursor.
    let rows = response
        .result
        .iter()
        .find(|(key, _)| key.as_str() != "last")
        .and_then(|(_, value)| value.as_array())
        .ok_or_else(|| MarketDataError::NoData {
            provider: PROVIDER_ID.to_string(),
        })?;

    let mut points = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        match parse_row(row) {
            Some(point) => points.push(point),
            None => warn!("Kraken: skipping malformed OHLC row at index {}", i),
        }
    }

    if points.is_empty() {
        return Err(MarketDataError::NoData {
            provider: PROVIDER_ID.to_string(),
        });
    }

    points.sort_by_key(|p| p.timestamp);
    Ok(points)
}

fn parse_row(row: &Value) -> Option<PricePoint> {
    let fields = row.as_array()?;
    let seconds = fields.first()?.as_i64()?;
    let timestamp = DateTime::<Utc>::from_timestamp(seconds, 0)?;
    let close = match fields.get(CLOSE_INDEX)? {
        Value::String(s) => Decimal::from_str(s).ok()?,
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
        _ => return None,
    };
    Some(PricePoint::new(timestamp, close))
}
