//! currencyapi.com provider for the latest FX rate table.
//!
//! The `v3/latest` endpoint quotes every currency (including XAU and BTC)
//! against USD:
//!
//! ```text
//! {"meta": {"last_updated_at": "2024-01-01T23:59:59Z"},
//!  "data": {"CNY": {"code": "CNY", "value": 7.0925}, "XAU": {"code": "XAU", "value": 0.000483}}}
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use num_traits::FromPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Number;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, warn};

use super::http::{build_client, fetch_text};
use crate::errors::MarketDataError;
use crate::models::LatestRates;
use crate::provider::ExchangeRateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "CURRENCY_API";

const BASE_URL: &str = "https://api.currencyapi.com/v3/latest";

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    meta: Option<Meta>,
    data: HashMap<String, CurrencyValue>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    last_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CurrencyValue {
    code: String,
    value: Number,
}

/// currencyapi.com provider.
pub struct CurrencyApiProvider {
    client: Client,
    api_key: String,
}

impl CurrencyApiProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            client: build_client(),
            api_key,
        }
    }

    /// Read the API key from `CURRENCY_API_KEY`.
    pub fn from_env() -> Result<Self, MarketDataError> {
        std::env::var("CURRENCY_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self::new)
            .ok_or_else(|| MarketDataError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })
    }
}

#[async_trait]
impl ExchangeRateProvider for CurrencyApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_rates(&self) -> Result<LatestRates, MarketDataError> {
        let request = self
            .client
            .get(BASE_URL)
            .header("apikey", &self.api_key);

        let body = fetch_text(PROVIDER_ID, request).await?;
        let rates = parse_latest_response(&body)?;

        debug!("currencyapi: received {} rates", rates.rates.len());
        Ok(rates)
    }
}

/// Decode a `v3/latest` payload.
///
/// Values are parsed from their JSON text so that no binary floating point
/// rounding enters the rate table.
pub fn parse_latest_response(body: &str) -> Result<LatestRates, MarketDataError> {
    let response: LatestResponse = serde_json::from_str(body)
        .map_err(|e| MarketDataError::validation(format!("currencyapi payload: {}", e)))?;

    let mut rates = LatestRates::new(PROVIDER_ID);
    rates.last_updated_at = response.meta.and_then(|m| m.last_updated_at);

    for (key, entry) in response.data {
        let code = if entry.code.is_empty() { key } else { entry.code };
        match number_to_decimal(&entry.value) {
            Some(value) if value >= Decimal::ZERO => {
                rates.rates.insert(code.to_uppercase(), value);
            }
            _ => warn!("currencyapi: ignoring invalid rate for {}: {}", code, entry.value),
        }
    }

    if rates.is_empty() {
        return Err(MarketDataError::NoData {
            provider: PROVIDER_ID.to_string(),
        });
    }

    Ok(rates)
}

fn number_to_decimal(number: &Number) -> Option<Decimal> {
    let text = number.to_string();
    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(&text).ok()
    } else {
        Decimal::from_str(&text).ok()
    };
    parsed.or_else(|| number.as_f64().and_then(Decimal::from_f64))
}
