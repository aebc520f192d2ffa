use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::ONE_HUNDRED;
use crate::fx::currency_code;
use crate::{errors::ValidationError, Error, Result};

// ============================================================================
// Targets
// ============================================================================

/// Desired share of total assets for one asset class.
///
/// `asset_class` is a settlement currency code (`USD`, `CNY`, `XAU`, `BTC`,
/// ...), `GOLD` as an alias for `XAU`, or `OTHER` for every currency without
/// a target of its own. Codes are kept upper case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassTarget {
    #[serde(deserialize_with = "deserialize_code")]
    pub asset_class: String,
    pub target_percent: Decimal,
}

fn deserialize_code<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|raw| currency_code(&raw))
}

impl AssetClassTarget {
    pub fn new(asset_class: impl Into<String>, target_percent: Decimal) -> Self {
        let asset_class: String = asset_class.into();
        Self {
            asset_class: currency_code(&asset_class),
            target_percent,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.asset_class.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Asset class cannot be empty".to_string(),
            )));
        }
        if self.target_percent < Decimal::ZERO || self.target_percent > ONE_HUNDRED {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Target percent for {} must be between 0 and 100",
                self.asset_class
            ))));
        }
        Ok(())
    }
}

// ============================================================================
// Advice
// ============================================================================

/// Valuation of a currency against its long-run USD reference rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FxStatus {
    /// Foreign currency is cheap: USD buys more of it than the reference.
    #[serde(rename = "CHEAP")]
    Cheap,
    #[serde(rename = "FAIR")]
    Fair,
    /// Foreign currency is expensive: USD buys less of it than the reference.
    #[serde(rename = "EXPENSIVE")]
    Expensive,
    /// No FX judgment (USD, BTC, gold, or no usable rate).
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl std::fmt::Display for FxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FxStatus::Cheap => "CHEAP",
            FxStatus::Fair => "FAIR",
            FxStatus::Expensive => "EXPENSIVE",
            FxStatus::NotApplicable => "N/A",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebalanceAction {
    StrongBuy,
    Buy,
    Add,
    Hold,
    Wait,
    Trim,
    Sell,
    StrongSell,
}

/// One actionable line of advice for an asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingSuggestion {
    pub asset_class: String,
    pub current_pct: Decimal,
    pub target_pct: Decimal,
    /// `current_pct - target_pct`; positive means overweight
    pub drift: Decimal,
    pub fx_status: FxStatus,
    pub action: RebalanceAction,
    /// USD amount that would close the drift
    pub amount_usd: Decimal,
    pub reason: String,
}
