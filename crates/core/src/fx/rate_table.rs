use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use assetwise_market_data::LatestRates;

use crate::constants::BASE_CURRENCY;

/// Canonical form of a currency or asset-class code: trimmed, upper case.
pub fn currency_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Exchange rates expressed as foreign units per 1 USD.
///
/// A rate of zero, or a missing rate, means "unavailable": conversions
/// through it yield zero instead of failing. The base currency converts at 1
/// unless the table carries an explicit USD rate. Codes are stored and looked
/// up in canonical form, so `"cny"` and `"CNY"` are the same currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Decimal>", into = "BTreeMap<String, Decimal>")]
pub struct RateTable {
    rates: BTreeMap<String, Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, currency: &str, rate: Decimal) -> Self {
        self.set(currency, rate);
        self
    }

    pub fn set(&mut self, currency: &str, rate: Decimal) {
        self.rates.insert(currency_code(currency), rate);
    }

    /// Units of `currency` per USD; zero when unavailable.
    pub fn rate(&self, currency: &str) -> Decimal {
        let code = currency_code(currency);
        match self.rates.get(&code) {
            Some(rate) => *rate,
            None if code == BASE_CURRENCY => Decimal::ONE,
            None => Decimal::ZERO,
        }
    }

    /// Whether a usable (non-zero) rate exists for `currency`.
    pub fn is_available(&self, currency: &str) -> bool {
        !self.rate(currency).is_zero()
    }

    /// Convert `amount` (already in rate units) into USD.
    ///
    /// Zero when the rate is unavailable or the result overflows.
    pub fn to_usd(&self, amount: Decimal, currency: &str) -> Decimal {
        self.checked_to_usd(amount, currency)
            .unwrap_or(Decimal::ZERO)
    }

    /// Like [`RateTable::to_usd`], but `None` on overflow.
    pub fn checked_to_usd(&self, amount: Decimal, currency: &str) -> Option<Decimal> {
        let rate = self.rate(currency);
        if rate.is_zero() {
            Some(Decimal::ZERO)
        } else {
            amount.checked_div(rate)
        }
    }

    /// Convert a USD value into `currency` units; zero when unavailable.
    ///
    /// `None` on overflow.
    pub fn from_usd(&self, usd: Decimal, currency: &str) -> Option<Decimal> {
        usd.checked_mul(self.rate(currency))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<LatestRates> for RateTable {
    fn from(latest: LatestRates) -> Self {
        let mut table = RateTable::new();
        for (currency, rate) in latest.rates {
            table.set(&currency, rate);
        }
        table
    }
}

impl From<BTreeMap<String, Decimal>> for RateTable {
    fn from(rates: BTreeMap<String, Decimal>) -> Self {
        rates.into_iter().collect()
    }
}

impl From<RateTable> for BTreeMap<String, Decimal> {
    fn from(table: RateTable) -> Self {
        table.rates
    }
}

impl<S: AsRef<str>> FromIterator<(S, Decimal)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut table = RateTable::new();
        for (currency, rate) in iter {
            table.set(currency.as_ref(), rate);
        }
        table
    }
}
