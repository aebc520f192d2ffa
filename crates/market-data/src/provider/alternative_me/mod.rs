//! alternative.me Crypto Fear & Greed index provider.
//!
//! Free endpoint, no API key. Values arrive as strings:
//!
//! ```text
//! {"name": "Fear and Greed Index", "data": [{"value": "40", "value_classification": "Fear", "timestamp": "1551157200"}]}
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::http::{build_client, fetch_text};
use crate::errors::MarketDataError;
use crate::models::FearGreedIndex;
use crate::provider::SentimentProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "ALTERNATIVE_ME";

const BASE_URL: &str = "https://api.alternative.me/fng/";

#[derive(Debug, Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
    timestamp: String,
}

pub struct AlternativeMeProvider {
    client: Client,
}

impl Default for AlternativeMeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AlternativeMeProvider {
    pub fn new() -> Self {
        Self {
            client: build_client(),
        }
    }
}

#[async_trait]
impl SentimentProvider for AlternativeMeProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_fear_greed_index(&self) -> Result<FearGreedIndex, MarketDataError> {
        let request = self.client.get(BASE_URL).query(&[("limit", "1")]);
        let body = fetch_text(PROVIDER_ID, request).await?;
        parse_fng_response(&body)
    }
}

/// Decode the most recent reading of an F&G payload.
pub fn parse_fng_response(body: &str) -> Result<FearGreedIndex, MarketDataError> {
    let response: FngResponse = serde_json::from_str(body)
        .map_err(|e| MarketDataError::validation(format!("alternative.me payload: {}", e)))?;

    let entry = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| MarketDataError::NoData {
            provider: PROVIDER_ID.to_string(),
        })?;

    let value: u8 = entry
        .value
        .trim()
        .parse()
        .ok()
        .filter(|v| *v <= 100)
        .ok_or_else(|| MarketDataError::validation(format!("F&G value '{}'", entry.value)))?;

    let timestamp = entry
        .timestamp
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| {
            MarketDataError::validation(format!("F&G timestamp '{}'", entry.timestamp))
        })?;

    Ok(FearGreedIndex {
        value,
        classification: entry.value_classification,
        timestamp,
    })
}
