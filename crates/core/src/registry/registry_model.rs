use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{BASE_CURRENCY, MAX_RISK_WEIGHT};
use crate::errors::{Error, Result};

/// Asset classes that get special treatment in the valuation pass.
///
/// Tags are explicit per entry. A field is never classified by looking for
/// "gold" or "btc" inside its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClassTag {
    /// Physical or paper gold, reported as `gold_ratio`
    Gold,
    /// The volatile reference asset (BTC) and instruments tracking it.
    /// Uses the dynamic risk factor when one is available.
    VolatileReference,
}

/// Metadata for one holding field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    /// Settlement currency code, looked up in the rate table
    pub currency: String,
    /// Whether the holding counts towards available liquidity
    pub liquid: bool,
    /// Multiplier converting the entered amount into rate units (e.g. grams to ounces)
    pub unit_scale: Decimal,
    /// Intrinsic risk weight on a 0-10 scale
    pub risk_weight: Decimal,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<AssetClassTag>,
}

impl RegistryEntry {
    /// Entry used for fields the registry does not know about.
    pub fn fallback() -> Self {
        Self {
            currency: BASE_CURRENCY.to_string(),
            liquid: false,
            unit_scale: Decimal::ONE,
            risk_weight: dec!(5),
            display_name: String::new(),
            class: None,
        }
    }

    pub fn is_gold(&self) -> bool {
        self.class == Some(AssetClassTag::Gold)
    }

    pub fn is_volatile_reference(&self) -> bool {
        self.class == Some(AssetClassTag::VolatileReference)
    }
}

/// Configured asset definition, as found in the engine settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDefinition {
    pub field: String,
    pub currency: String,
    #[serde(default)]
    pub liquid: bool,
    #[serde(default = "default_unit_scale")]
    pub unit_scale: Decimal,
    pub risk_weight: Decimal,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub class: Option<AssetClassTag>,
}

fn default_unit_scale() -> Decimal {
    Decimal::ONE
}

impl AssetDefinition {
    pub fn validate(&self) -> Result<()> {
        if self.field.trim().is_empty() {
            return Err(Error::InvalidConfigValue(
                "Asset field name cannot be empty".to_string(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::InvalidConfigValue(format!(
                "Asset '{}' has no currency",
                self.field
            )));
        }
        if self.unit_scale <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "Asset '{}' unit scale must be positive",
                self.field
            )));
        }
        if self.risk_weight < Decimal::ZERO || self.risk_weight > MAX_RISK_WEIGHT {
            return Err(Error::InvalidConfigValue(format!(
                "Asset '{}' risk weight must be between 0 and 10",
                self.field
            )));
        }
        Ok(())
    }

    pub fn into_entry(self) -> (String, RegistryEntry) {
        let display_name = self.display_name.unwrap_or_else(|| self.field.clone());
        (
            self.field,
            RegistryEntry {
                currency: self.currency.to_uppercase(),
                liquid: self.liquid,
                unit_scale: self.unit_scale,
                risk_weight: self.risk_weight,
                display_name,
                class: self.class,
            },
        )
    }
}
