use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, BTreeSet};

use super::rebalancing_model::{
    AssetClassTarget, FxStatus, RebalanceAction, RebalancingSuggestion,
};
use crate::constants::{BASE_CURRENCY, ONE_HUNDRED, OTHER_ASSET_CLASS};
use crate::fx::{currency_code, RateTable};
use crate::valuation::ValuationResult;

/// Default FX band around the reference rate (5%).
pub const DEFAULT_FX_BAND: Decimal = dec!(0.05);

/// Alias accepted for the gold asset class.
pub const GOLD_ASSET_CLASS: &str = "GOLD";

const GOLD_CURRENCY: &str = "XAU";
const BTC_CURRENCY: &str = "BTC";

/// Rebalancing advisor for a configured FX band and set of non-fiat classes.
///
/// Non-fiat classes (gold, BTC) never receive an FX judgment.
#[derive(Debug, Clone)]
pub struct RebalancingAdvisor {
    band: Decimal,
    non_fiat: BTreeSet<String>,
}

impl Default for RebalancingAdvisor {
    fn default() -> Self {
        Self::new(DEFAULT_FX_BAND)
    }
}

impl RebalancingAdvisor {
    pub fn new(band: Decimal) -> Self {
        let non_fiat = [GOLD_CURRENCY, BTC_CURRENCY, GOLD_ASSET_CLASS]
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { band, non_fiat }
    }

    /// Add asset classes that must never get an FX judgment.
    pub fn with_non_fiat<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for class in classes {
            let class: String = class.into();
            self.non_fiat.insert(currency_code(&class));
        }
        self
    }

    pub fn band(&self) -> Decimal {
        self.band
    }

    /// FX status of `currency` at `current_rate` (units per USD).
    ///
    /// A higher rate than the reference means the currency is cheap to buy
    /// with USD. Currency codes match regardless of case.
    pub fn evaluate_fx_status(
        &self,
        currency: &str,
        current_rate: Decimal,
        fx_reference: &BTreeMap<String, Decimal>,
    ) -> FxStatus {
        let code = currency_code(currency);
        if code == BASE_CURRENCY || self.non_fiat.contains(&code) {
            return FxStatus::NotApplicable;
        }
        let reference = fx_reference.get(&code).or_else(|| {
            fx_reference
                .iter()
                .find(|(key, _)| currency_code(key) == code)
                .map(|(_, reference)| reference)
        });
        let reference = match reference {
            Some(reference) if !reference.is_zero() => *reference,
            _ => return FxStatus::NotApplicable,
        };
        if current_rate.is_zero() {
            return FxStatus::NotApplicable;
        }

        if current_rate >= reference * (Decimal::ONE + self.band) {
            FxStatus::Cheap
        } else if current_rate <= reference * (Decimal::ONE - self.band) {
            FxStatus::Expensive
        } else {
            FxStatus::Fair
        }
    }

    /// Compare the current currency distribution against the targets.
    ///
    /// Returns actionable suggestions in target order. `WAIT` entries are
    /// omitted. Empty targets or an empty portfolio give no suggestions.
    pub fn advise(
        &self,
        result: &ValuationResult,
        targets: &[AssetClassTarget],
        threshold: Decimal,
        current_rates: &RateTable,
        fx_reference: &BTreeMap<String, Decimal>,
    ) -> Vec<RebalancingSuggestion> {
        if targets.is_empty() || !result.has_assets() {
            return Vec::new();
        }

        let targets: Vec<AssetClassTarget> = targets
            .iter()
            .map(|target| AssetClassTarget::new(target.asset_class.as_str(), target.target_percent))
            .collect();
        let current = map_distribution(result, &targets);
        let mut suggestions = Vec::new();

        for target in &targets {
            let current_pct = current
                .get(target.asset_class.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO);
            let drift = current_pct - target.target_percent;
            let amount_usd = (result.total_assets_usd * (drift / ONE_HUNDRED)).abs();
            let fx_status = self.evaluate_fx_status(
                &target.asset_class,
                current_rates.rate(&target.asset_class),
                fx_reference,
            );

            let (action, reason) = decide(drift, threshold, fx_status);
            if action == RebalanceAction::Wait {
                debug!(
                    "{} within threshold (drift {}), no action",
                    target.asset_class,
                    drift.round_dp(2)
                );
                continue;
            }

            suggestions.push(RebalancingSuggestion {
                asset_class: target.asset_class.clone(),
                current_pct,
                target_pct: target.target_percent,
                drift,
                fx_status,
                action,
                amount_usd,
                reason,
            });
        }
        suggestions
    }
}

/// Advice with the default FX band.
pub fn advise(
    result: &ValuationResult,
    targets: &[AssetClassTarget],
    threshold: Decimal,
    current_rates: &RateTable,
    fx_reference: &BTreeMap<String, Decimal>,
) -> Vec<RebalancingSuggestion> {
    RebalancingAdvisor::default().advise(result, targets, threshold, current_rates, fx_reference)
}

/// FX status with the default band.
pub fn evaluate_fx_status(
    currency: &str,
    current_rate: Decimal,
    fx_reference: &BTreeMap<String, Decimal>,
) -> FxStatus {
    RebalancingAdvisor::default().evaluate_fx_status(currency, current_rate, fx_reference)
}

/// Current percentage per target asset class.
///
/// `GOLD` reads the `XAU` share. Currencies without a target are summed into
/// `OTHER` when an `OTHER` target exists.
fn map_distribution<'a>(
    result: &ValuationResult,
    targets: &'a [AssetClassTarget],
) -> BTreeMap<&'a str, Decimal> {
    let targeted: BTreeSet<&str> = targets
        .iter()
        .map(|target| distribution_key(&target.asset_class))
        .collect();

    let mut other = Decimal::ZERO;
    for (currency, pct) in &result.currency_distribution {
        if !targeted.contains(currency.as_str()) {
            other += *pct;
        }
    }

    let mut mapped = BTreeMap::new();
    for target in targets {
        let key = target.asset_class.as_str();
        let mut pct = result.currency_pct(distribution_key(key));
        if key == OTHER_ASSET_CLASS {
            pct += other;
        }
        mapped.insert(key, pct);
    }
    mapped
}

fn distribution_key(asset_class: &str) -> &str {
    if asset_class == GOLD_ASSET_CLASS {
        GOLD_CURRENCY
    } else {
        asset_class
    }
}

fn decide(drift: Decimal, threshold: Decimal, fx_status: FxStatus) -> (RebalanceAction, String) {
    let shown = drift.abs().round_dp(1);
    if drift > threshold {
        match fx_status {
            FxStatus::Expensive => (
                RebalanceAction::StrongSell,
                format!("Overweight by {}% and the currency is expensive, take profit", shown),
            ),
            FxStatus::Cheap => (
                RebalanceAction::Hold,
                format!("Overweight by {}% but the currency is cheap, hold off selling", shown),
            ),
            _ => (
                RebalanceAction::Sell,
                format!("Overweight by {}%, rebalance", shown),
            ),
        }
    } else if drift < -threshold {
        match fx_status {
            FxStatus::Cheap => (
                RebalanceAction::StrongBuy,
                format!("Underweight by {}% and the currency is cheap, buy", shown),
            ),
            FxStatus::Expensive => (
                RebalanceAction::Hold,
                format!("Underweight by {}% but the currency is expensive, hold off buying", shown),
            ),
            _ => (
                RebalanceAction::Buy,
                format!("Underweight by {}%, top up", shown),
            ),
        }
    } else if fx_status == FxStatus::Expensive && drift > Decimal::ZERO {
        (
            RebalanceAction::Trim,
            "Position within range but the currency is expensive".to_string(),
        )
    } else if fx_status == FxStatus::Cheap && drift < Decimal::ZERO {
        (
            RebalanceAction::Add,
            "Position within range and the currency is cheap".to_string(),
        )
    } else {
        (RebalanceAction::Wait, "Within threshold".to_string())
    }
}
