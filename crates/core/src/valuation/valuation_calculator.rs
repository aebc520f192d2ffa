use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::valuation_model::ValuationResult;
use crate::constants::{
    DISPLAY_DECIMAL_PRECISION, MAX_RISK_WEIGHT, MIN_DISTRIBUTION_PCT, ONE_HUNDRED,
    SPECULATIVE_RISK_THRESHOLD,
};
use crate::fx::RateTable;
use crate::holdings::HoldingsSnapshot;
use crate::registry::{AssetRegistry, RegistryEntry};
use crate::risk::RiskFactorSource;

/// One counted holding: its registry metadata and USD value.
struct ValuedHolding<'a> {
    field: &'a str,
    entry: &'a RegistryEntry,
    usd_value: Decimal,
}

/// Values a snapshot in USD using the dynamic BTC risk factor currently
/// published by `risk_source`.
///
/// When the source has nothing (cold cache, expired entry, failed refresh)
/// the registry's static weight applies.
pub fn normalize_with_source(
    snapshot: &HoldingsSnapshot,
    rates: &RateTable,
    registry: &AssetRegistry,
    risk_source: &dyn RiskFactorSource,
) -> ValuationResult {
    let dynamic_btc_risk = risk_source.get().map(|factor| factor.value());
    if dynamic_btc_risk.is_none() {
        debug!("No dynamic BTC risk factor available, using static registry weight");
    }
    normalize(snapshot, rates, registry, dynamic_btc_risk)
}

/// Values a holdings snapshot in USD and derives liquidity, concentration
/// and risk ratios.
///
/// # Arguments
///
/// * `snapshot` - Raw holding amounts per field.
/// * `rates` - Foreign units per USD. Missing or zero rates value the holding at 0.
/// * `registry` - Field metadata. Fields without an explicit entry are skipped.
/// * `dynamic_btc_risk` - Overrides the static weight of BTC-class holdings
///   when strictly positive.
///
/// This is a pure function: identical inputs give identical results.
pub fn normalize(
    snapshot: &HoldingsSnapshot,
    rates: &RateTable,
    registry: &AssetRegistry,
    dynamic_btc_risk: Option<Decimal>,
) -> ValuationResult {
    // --- 1. Value every registered, non-zero holding ---
    let holdings = value_holdings(snapshot, rates, registry);

    let mut total_assets_usd = Decimal::ZERO;
    let mut total_savings_usd = Decimal::ZERO;
    let mut gold_val_usd = Decimal::ZERO;
    let mut btc_val_usd = Decimal::ZERO;
    let mut currency_exposure: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut asset_values_usd = BTreeMap::new();

    // --- 2. Aggregate exposure ---
    for holding in &holdings {
        total_assets_usd += holding.usd_value;
        if holding.entry.liquid {
            total_savings_usd += holding.usd_value;
        }
        if holding.entry.is_gold() {
            gold_val_usd += holding.usd_value;
        }
        if holding.entry.is_volatile_reference() {
            btc_val_usd += holding.usd_value;
        }
        *currency_exposure
            .entry(holding.entry.currency.as_str())
            .or_insert(Decimal::ZERO) += holding.usd_value;
        asset_values_usd.insert(holding.field.to_string(), holding.usd_value);
    }

    // --- 3. Risk pass ---
    let dynamic_btc_risk = dynamic_btc_risk
        .filter(|risk| *risk > Decimal::ZERO)
        .map(|risk| risk.min(MAX_RISK_WEIGHT));

    let mut weighted_risk_sum = Decimal::ZERO;
    let mut speculative_sum = Decimal::ZERO;
    for holding in &holdings {
        let weight = effective_risk_weight(holding.entry, dynamic_btc_risk);
        weighted_risk_sum += holding.usd_value * weight;
        if weight > SPECULATIVE_RISK_THRESHOLD {
            speculative_sum += holding.usd_value;
        }
    }

    // --- 4. Ratios ---
    let currency_distribution = currency_exposure
        .into_iter()
        .filter_map(|(currency, value)| {
            let pct = percentage(value, total_assets_usd);
            (pct > MIN_DISTRIBUTION_PCT)
                .then(|| (currency.to_string(), pct.round_dp(DISPLAY_DECIMAL_PRECISION)))
        })
        .collect();

    let weighted_risk_score = if total_assets_usd.is_zero() {
        Decimal::ZERO
    } else {
        weighted_risk_sum / total_assets_usd
    };

    ValuationResult {
        total_assets_usd,
        total_savings_usd,
        available_liquidity_ratio: percentage(total_savings_usd, total_assets_usd),
        gold_ratio: percentage(gold_val_usd, total_assets_usd),
        btc_ratio: percentage(btc_val_usd, total_assets_usd),
        weighted_risk_score,
        speculative_ratio: percentage(speculative_sum, total_assets_usd),
        currency_distribution,
        asset_values_usd,
        dynamic_btc_risk: if btc_val_usd.is_zero() {
            None
        } else {
            dynamic_btc_risk
        },
    }
}

/// USD value of `amount` units of a registry entry.
///
/// `None` when the conversion overflows the decimal range.
pub fn usd_value(amount: Decimal, entry: &RegistryEntry, rates: &RateTable) -> Option<Decimal> {
    amount
        .checked_mul(entry.unit_scale)
        .and_then(|scaled| rates.checked_to_usd(scaled, &entry.currency))
}

/// Static weight, or the dynamic factor for BTC-class holdings when present.
pub fn effective_risk_weight(entry: &RegistryEntry, dynamic_btc_risk: Option<Decimal>) -> Decimal {
    match dynamic_btc_risk {
        Some(risk) if entry.is_volatile_reference() => risk,
        _ => entry.risk_weight,
    }
}

/// Values every registered, non-zero holding.
///
/// A holding is only admitted while the running total and the running
/// risk-weighted total stay inside the decimal range. BTC-class holdings are
/// bounded with the maximum weight since a dynamic factor may replace theirs.
/// Every later sum is bounded by those two, so the aggregation passes cannot
/// overflow.
fn value_holdings<'a>(
    snapshot: &'a HoldingsSnapshot,
    rates: &RateTable,
    registry: &'a AssetRegistry,
) -> Vec<ValuedHolding<'a>> {
    let mut holdings = Vec::with_capacity(snapshot.len());
    let mut admitted_total = Decimal::ZERO;
    let mut admitted_weighted = Decimal::ZERO;
    for (field, amount) in snapshot.iter() {
        if amount.is_zero() {
            continue;
        }
        let Some(entry) = registry.get(field) else {
            debug!("Skipping unregistered holding field '{}'", field);
            continue;
        };
        if !rates.is_available(&entry.currency) {
            warn!(
                "No {} rate available; '{}' valued at 0 USD",
                entry.currency, field
            );
        }
        let weight_bound = if entry.is_volatile_reference() {
            entry.risk_weight.max(MAX_RISK_WEIGHT)
        } else {
            entry.risk_weight
        };
        let admitted = usd_value(amount, entry, rates).and_then(|value| {
            let total = admitted_total.checked_add(value)?;
            let weighted = admitted_weighted.checked_add(value.checked_mul(weight_bound)?)?;
            Some((value, total, weighted))
        });
        let Some((value, total, weighted)) = admitted else {
            warn!(
                "USD value of '{}' ({} {}) overflows, valued at 0 USD",
                field, amount, entry.currency
            );
            continue;
        };
        admitted_total = total;
        admitted_weighted = weighted;
        holdings.push(ValuedHolding {
            field,
            entry,
            usd_value: value,
        });
    }
    holdings
}

/// `part / total * 100`, defined as zero when `total` is zero.
pub(crate) fn percentage(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        part / total * ONE_HUNDRED
    }
}
