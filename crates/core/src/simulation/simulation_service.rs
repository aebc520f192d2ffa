use log::{info, warn};
use rust_decimal::Decimal;

use super::simulation_model::{SimulationAction, SimulationDiff, SimulationResult};
use crate::fx::RateTable;
use crate::holdings::HoldingsSnapshot;
use crate::registry::AssetRegistry;
use crate::valuation::{normalize, usd_value};

/// Apply `actions` in order to a copy of `snapshot` and value both versions
/// with the same rates and risk factor.
///
/// The input snapshot is never modified. Actions that cannot be applied
/// (unknown field, missing rate, empty source) are skipped and reported in
/// the result's logs; no value is ever destroyed by a skipped transfer.
pub fn simulate(
    snapshot: &HoldingsSnapshot,
    actions: &[SimulationAction],
    rates: &RateTable,
    registry: &AssetRegistry,
    dynamic_btc_risk: Option<Decimal>,
) -> SimulationResult {
    let original = normalize(snapshot, rates, registry, dynamic_btc_risk);

    let mut simulated_holdings = snapshot.clone();
    let mut logs = Vec::with_capacity(actions.len());
    for action in actions {
        let line = match action {
            SimulationAction::Adjust { field, amount } => {
                apply_adjust(&mut simulated_holdings, registry, field, *amount)
            }
            SimulationAction::Transfer { from, to, amount } => {
                apply_transfer(&mut simulated_holdings, rates, registry, from, to, *amount)
            }
        };
        info!("Simulation: {}", line);
        logs.push(line);
    }

    let simulated = normalize(&simulated_holdings, rates, registry, dynamic_btc_risk);
    let diff = SimulationDiff::between(&original, &simulated);

    SimulationResult {
        original,
        simulated,
        simulated_holdings,
        logs,
        diff,
    }
}

fn apply_adjust(
    holdings: &mut HoldingsSnapshot,
    registry: &AssetRegistry,
    field: &str,
    amount: Decimal,
) -> String {
    if !registry.contains(field) {
        warn!("Simulation adjust skipped, unknown field '{}'", field);
        return format!("Skipped adjustment of unknown field '{}'", field);
    }
    let Some(updated) = holdings.amount(field).checked_add(amount) else {
        warn!("Simulation adjust skipped, '{}' would overflow", field);
        return format!(
            "Skipped adjustment of {}: amount out of range",
            registry.display_name(field)
        );
    };
    holdings.set_clamped(field, updated);
    format!("Adjusted {} by {}", registry.display_name(field), signed(amount))
}

fn apply_transfer(
    holdings: &mut HoldingsSnapshot,
    rates: &RateTable,
    registry: &AssetRegistry,
    from: &str,
    to: &str,
    amount: Decimal,
) -> String {
    let (Some(source), Some(target)) = (registry.get(from), registry.get(to)) else {
        warn!(
            "Simulation transfer skipped, unknown field in '{}' -> '{}'",
            from, to
        );
        return format!("Skipped transfer {} -> {}: unknown field", from, to);
    };
    if !rates.is_available(&source.currency) || !rates.is_available(&target.currency) {
        warn!(
            "Simulation transfer skipped, missing {} or {} rate",
            source.currency, target.currency
        );
        return format!(
            "Skipped transfer {} -> {}: no {}/{} rate",
            registry.display_name(from),
            registry.display_name(to),
            source.currency,
            target.currency
        );
    }

    let balance = holdings.amount(from);
    let moved = amount.abs().min(balance);
    if moved.is_zero() {
        return format!(
            "Skipped transfer {} -> {}: nothing to move",
            registry.display_name(from),
            registry.display_name(to)
        );
    }

    let converted = usd_value(moved, source, rates)
        .and_then(|usd| rates.from_usd(usd, &target.currency))
        .and_then(|units| units.checked_div(target.unit_scale))
        .and_then(|received| Some((received, holdings.amount(to).checked_add(received)?)));
    let Some((received, target_balance)) = converted else {
        warn!(
            "Simulation transfer skipped, {} -> {} overflows",
            from, to
        );
        return format!(
            "Skipped transfer {} -> {}: amount out of range",
            registry.display_name(from),
            registry.display_name(to)
        );
    };

    holdings.set_clamped(from, balance - moved);
    holdings.set_clamped(to, target_balance);

    format!(
        "Transferred {} ({}) -> {} ({})",
        registry.display_name(from),
        moved,
        registry.display_name(to),
        received.round_dp(4)
    )
}

fn signed(amount: Decimal) -> String {
    if amount.is_sign_negative() {
        amount.to_string()
    } else {
        format!("+{}", amount)
    }
}
