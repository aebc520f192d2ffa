use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{Result, ValidationError};

/// Raw holding amounts keyed by field name, in each field's own unit.
///
/// Amounts are validated when the snapshot is built: field names must be
/// non-empty and amounts non-negative. A valuation pass only reads the
/// snapshot; what-if simulations mutate a clone.
///
/// In JSON, amounts given as strings are read exactly while plain numbers go
/// through a binary float. Amounts are always written back as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, AmountInput>", into = "BTreeMap<String, AmountOutput>")]
pub struct HoldingsSnapshot {
    amounts: BTreeMap<String, Decimal>,
}

impl HoldingsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from `(field, amount)` pairs.
    pub fn from_amounts<I, K>(amounts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<String>,
    {
        let mut snapshot = Self::new();
        for (field, amount) in amounts {
            snapshot.insert(field, amount)?;
        }
        Ok(snapshot)
    }

    /// Set the amount of a field, rejecting negative amounts and blank names.
    pub fn insert(&mut self, field: impl Into<String>, amount: Decimal) -> Result<()> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(ValidationError::MissingField("field".to_string()).into());
        }
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::NegativeAmount {
                field,
                amount: amount.to_string(),
            }
            .into());
        }
        self.amounts.insert(field, amount);
        Ok(())
    }

    /// Set an amount, flooring it at zero. Used by simulations.
    pub(crate) fn set_clamped(&mut self, field: &str, amount: Decimal) {
        self.amounts
            .insert(field.to_string(), amount.max(Decimal::ZERO));
    }

    /// Amount held for `field`; absent fields hold zero.
    pub fn amount(&self, field: &str) -> Decimal {
        self.amounts.get(field).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.amounts.contains_key(field)
    }

    /// Iterate `(field, amount)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.amounts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Exact(#[serde(with = "rust_decimal::serde::str")] Decimal),
    Number(Decimal),
}

impl From<AmountInput> for Decimal {
    fn from(input: AmountInput) -> Self {
        match input {
            AmountInput::Exact(amount) | AmountInput::Number(amount) => amount,
        }
    }
}

#[derive(Serialize)]
#[serde(transparent)]
struct AmountOutput(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl TryFrom<BTreeMap<String, AmountInput>> for HoldingsSnapshot {
    type Error = crate::errors::Error;

    fn try_from(amounts: BTreeMap<String, AmountInput>) -> Result<Self> {
        Self::from_amounts(
            amounts
                .into_iter()
                .map(|(field, amount)| (field, Decimal::from(amount))),
        )
    }
}

impl From<HoldingsSnapshot> for BTreeMap<String, AmountOutput> {
    fn from(snapshot: HoldingsSnapshot) -> Self {
        snapshot
            .amounts
            .into_iter()
            .map(|(field, amount)| (field, AmountOutput(amount)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejects_negative_amount() {
        let result = HoldingsSnapshot::from_amounts([("savings_usd", dec!(-1))]);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::NegativeAmount { .. }))
        ));
    }

    #[test]
    fn test_rejects_blank_field() {
        let result = HoldingsSnapshot::from_amounts([("  ", dec!(1))]);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
    }

    #[test]
    fn test_missing_field_reads_zero() {
        let snapshot = HoldingsSnapshot::from_amounts([("btc", dec!(0.5))]).unwrap();
        assert_eq!(snapshot.amount("btc"), dec!(0.5));
        assert_eq!(snapshot.amount("gold_g"), Decimal::ZERO);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = HoldingsSnapshot::from_amounts([("savings_usd", dec!(100))]).unwrap();
        let mut copy = original.clone();
        copy.set_clamped("savings_usd", dec!(-50));

        assert_eq!(copy.amount("savings_usd"), Decimal::ZERO);
        assert_eq!(original.amount("savings_usd"), dec!(100));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: HoldingsSnapshot = serde_json::from_str(r#"{"savings_usd": 1000.5}"#).unwrap();
        assert_eq!(ok.amount("savings_usd"), dec!(1000.5));

        let bad = serde_json::from_str::<HoldingsSnapshot>(r#"{"savings_usd": -3}"#);
        assert!(bad.is_err());

        let bad_text = serde_json::from_str::<HoldingsSnapshot>(r#"{"savings_usd": "-3"}"#);
        assert!(bad_text.is_err());
    }

    #[test]
    fn test_string_amounts_keep_full_precision() {
        let json = r#"{"btc":"0.1234567890123456789","savings_usd":"12345678901234567.89"}"#;
        let snapshot: HoldingsSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.amount("savings_usd"), dec!(12345678901234567.89));
        assert_eq!(snapshot.amount("btc"), dec!(0.1234567890123456789));
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), json);
    }
}
