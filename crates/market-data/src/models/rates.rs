use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Latest exchange rates expressed as foreign units per 1 USD.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestRates {
    /// Currency code -> units per USD
    pub rates: HashMap<String, Decimal>,

    /// When the provider last refreshed its data, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<DateTime<Utc>>,

    /// Source of the rates (CURRENCY_API, MANUAL, ...)
    pub source: String,
}

impl LatestRates {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            rates: HashMap::new(),
            last_updated_at: None,
            source: source.into(),
        }
    }

    pub fn with_rate(mut self, currency: &str, rate: Decimal) -> Self {
        self.rates.insert(currency.to_uppercase(), rate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
