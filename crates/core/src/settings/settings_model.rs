use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use crate::constants::BASE_CURRENCY;
use crate::errors::{Error, Result};
use crate::fx::currency_code;
use crate::rebalancing::{AssetClassTarget, RebalancingAdvisor, DEFAULT_FX_BAND};
use crate::registry::{AssetDefinition, AssetRegistry};
use crate::risk::RiskFactorSettings;

/// Engine configuration. Every field has a default, so `{}` is a valid
/// settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub base_currency: String,
    pub target_allocation: Vec<AssetClassTarget>,
    /// Drift (percentage points) beyond which a class is rebalanced
    pub rebalance_threshold: Decimal,
    /// Relative band around the FX reference rate
    pub fx_band: Decimal,
    /// Long-run reference rates, foreign units per USD
    #[serde(deserialize_with = "deserialize_reference_rates")]
    pub fx_reference: BTreeMap<String, Decimal>,
    pub risk: RiskFactorSettings,
    pub risk_cache_ttl_secs: u64,
    pub rate_refresh_secs: u64,
    /// Replaces the built-in asset registry when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<AssetDefinition>>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_currency: BASE_CURRENCY.to_string(),
            target_allocation: Vec::new(),
            rebalance_threshold: dec!(5),
            fx_band: DEFAULT_FX_BAND,
            fx_reference: BTreeMap::new(),
            risk: RiskFactorSettings::default(),
            risk_cache_ttl_secs: 12 * 60 * 60,
            rate_refresh_secs: 3 * 60 * 60,
            assets: None,
        }
    }
}

fn deserialize_reference_rates<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Decimal>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(currency, rate)| (currency_code(&currency), rate))
        .collect())
}

impl EngineSettings {
    /// Parse and validate a JSON settings document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON settings file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigIO(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json_str(&content)?;
        info!(
            "Loaded engine settings from {} ({} targets)",
            path.display(),
            settings.target_allocation.len()
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_currency != BASE_CURRENCY {
            return Err(Error::InvalidConfigValue(format!(
                "Unsupported base currency '{}', only {} is supported",
                self.base_currency, BASE_CURRENCY
            )));
        }

        let mut seen = HashSet::new();
        for target in &self.target_allocation {
            target.validate()?;
            if !seen.insert(target.asset_class.as_str()) {
                return Err(Error::InvalidConfigValue(format!(
                    "Target allocation for '{}' is defined twice",
                    target.asset_class
                )));
            }
        }

        if self.rebalance_threshold < Decimal::ZERO {
            return Err(Error::InvalidConfigValue(
                "rebalanceThreshold must not be negative".to_string(),
            ));
        }
        if self.fx_band <= Decimal::ZERO || self.fx_band >= Decimal::ONE {
            return Err(Error::InvalidConfigValue(
                "fxBand must be between 0 and 1 (exclusive)".to_string(),
            ));
        }
        if let Some((currency, _)) = self
            .fx_reference
            .iter()
            .find(|(_, rate)| **rate <= Decimal::ZERO)
        {
            return Err(Error::InvalidConfigValue(format!(
                "fxReference rate for '{}' must be positive",
                currency
            )));
        }
        if self.risk_cache_ttl_secs == 0 || self.rate_refresh_secs == 0 {
            return Err(Error::InvalidConfigValue(
                "riskCacheTtlSecs and rateRefreshSecs must be positive".to_string(),
            ));
        }

        self.risk.validate()?;

        if let Some(assets) = &self.assets {
            for asset in assets {
                asset.validate()?;
            }
        }
        Ok(())
    }

    /// Registry from the configured assets, or the built-in one.
    pub fn build_registry(&self) -> Result<AssetRegistry> {
        match &self.assets {
            Some(definitions) => AssetRegistry::from_definitions(definitions.clone()),
            None => Ok(AssetRegistry::new()),
        }
    }

    /// Advisor with the configured band, treating the registry's gold and
    /// BTC currencies as non-fiat.
    pub fn advisor(&self, registry: &AssetRegistry) -> RebalancingAdvisor {
        RebalancingAdvisor::new(self.fx_band).with_non_fiat(registry.non_fiat_currencies())
    }

    pub fn risk_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.risk_cache_ttl_secs)
    }

    pub fn rate_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.rate_refresh_secs)
    }
}
