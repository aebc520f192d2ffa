use super::*;
use crate::fx::RateTable;
use crate::holdings::HoldingsSnapshot;
use crate::registry::AssetRegistry;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn rates() -> RateTable {
    RateTable::new()
        .with_rate("CNY", dec!(7.2))
        .with_rate("BTC", dec!(0.00001))
        .with_rate("XAU", dec!(0.0005))
}

fn holdings() -> HoldingsSnapshot {
    HoldingsSnapshot::from_amounts([
        ("savings_usd", dec!(1000)),
        ("savings_cny", dec!(7200)),
    ])
    .unwrap()
}

fn adjust(field: &str, amount: Decimal) -> SimulationAction {
    SimulationAction::Adjust {
        field: field.to_string(),
        amount,
    }
}

fn transfer(from: &str, to: &str, amount: Decimal) -> SimulationAction {
    SimulationAction::Transfer {
        from: from.to_string(),
        to: to.to_string(),
        amount,
    }
}

#[test]
fn test_no_actions_leaves_valuation_unchanged() {
    let result = simulate(&holdings(), &[], &rates(), &AssetRegistry::new(), None);

    assert_eq!(result.original, result.simulated);
    assert_eq!(result.diff, SimulationDiff::default());
    assert!(result.logs.is_empty());
}

#[test]
fn test_adjust_adds_amount() {
    let result = simulate(
        &holdings(),
        &[adjust("savings_usd", dec!(500))],
        &rates(),
        &AssetRegistry::new(),
        None,
    );

    assert_eq!(result.simulated_holdings.amount("savings_usd"), dec!(1500));
    assert_eq!(result.diff.total_assets_usd, dec!(500));
    assert_eq!(result.logs, vec!["Adjusted Savings (USD) by +500".to_string()]);
}

#[test]
fn test_adjust_floors_at_zero() {
    let result = simulate(
        &holdings(),
        &[adjust("savings_usd", dec!(-2000))],
        &rates(),
        &AssetRegistry::new(),
        None,
    );

    assert_eq!(result.simulated_holdings.amount("savings_usd"), Decimal::ZERO);
    assert_eq!(result.simulated.total_assets_usd, dec!(1000));
    assert_eq!(result.diff.total_assets_usd, dec!(-1000));
}

#[test]
fn test_adjust_unknown_field_is_skipped() {
    let original = holdings();
    let result = simulate(
        &original,
        &[adjust("yacht", dec!(1))],
        &rates(),
        &AssetRegistry::new(),
        None,
    );

    assert_eq!(result.simulated_holdings, original);
    assert!(result.logs[0].contains("unknown field"));
}

#[test]
fn test_transfer_converts_through_usd() {
    let result = simulate(
        &holdings(),
        &[transfer("savings_cny", "savings_usd", dec!(7200))],
        &rates(),
        &AssetRegistry::new(),
        None,
    );

    assert_eq!(result.simulated_holdings.amount("savings_cny"), Decimal::ZERO);
    assert_eq!(result.simulated_holdings.amount("savings_usd"), dec!(2000));
    assert_eq!(result.diff.total_assets_usd, Decimal::ZERO);
    assert_eq!(result.simulated.currency_pct("USD"), dec!(100));
}

#[test]
fn test_transfer_is_capped_at_source_balance() {
    let result = simulate(
        &holdings(),
        &[transfer("savings_usd", "btc", dec!(-5000))],
        &rates(),
        &AssetRegistry::new(),
        None,
    );

    assert_eq!(result.simulated_holdings.amount("savings_usd"), Decimal::ZERO);
    assert_eq!(result.simulated_holdings.amount("btc"), dec!(0.01));
    assert_eq!(result.diff.total_assets_usd, Decimal::ZERO);
    assert_eq!(result.simulated.btc_ratio, dec!(50));
    assert!(result.diff.weighted_risk_score > Decimal::ZERO);
    assert!(result.diff.available_liquidity_ratio < Decimal::ZERO);
}

#[test]
fn test_transfer_without_rate_is_skipped() {
    let original = HoldingsSnapshot::from_amounts([("savings_eur", dec!(100))]).unwrap();
    let result = simulate(
        &original,
        &[transfer("savings_eur", "savings_usd", dec!(100))],
        &rates(),
        &AssetRegistry::new(),
        None,
    );

    assert_eq!(result.simulated_holdings, original);
    assert!(result.logs[0].starts_with("Skipped transfer"));
}

#[test]
fn test_transfer_with_unknown_field_is_skipped() {
    let original = holdings();
    let result = simulate(
        &original,
        &[transfer("savings_usd", "yacht", dec!(100))],
        &rates(),
        &AssetRegistry::new(),
        None,
    );

    assert_eq!(result.simulated_holdings, original);
}

#[test]
fn test_actions_apply_in_order() {
    let result = simulate(
        &holdings(),
        &[
            transfer("savings_cny", "savings_usd", dec!(7200)),
            transfer("savings_usd", "btc", dec!(2000)),
        ],
        &rates(),
        &AssetRegistry::new(),
        None,
    );

    assert_eq!(result.simulated_holdings.amount("btc"), dec!(0.02));
    assert_eq!(result.simulated.btc_ratio, dec!(100));
    assert_eq!(result.logs.len(), 2);
}

#[test]
fn test_input_snapshot_is_not_modified() {
    let original = holdings();
    let before = original.clone();
    let _ = simulate(
        &original,
        &[adjust("savings_usd", dec!(1)), transfer("savings_cny", "btc", dec!(10))],
        &rates(),
        &AssetRegistry::new(),
        None,
    );

    assert_eq!(original, before);
}

#[test]
fn test_dynamic_risk_applies_to_both_sides() {
    let result = simulate(
        &holdings(),
        &[transfer("savings_usd", "btc", dec!(1000))],
        &rates(),
        &AssetRegistry::new(),
        Some(dec!(2)),
    );

    // (1000 * 0.5 + 1000 * 2) / 2000
    assert_eq!(result.simulated.weighted_risk_score, dec!(1.25));
}

#[test]
fn test_action_deserialization() {
    let actions: Vec<SimulationAction> = serde_json::from_str(
        r#"[
            {"type": "ADJUST", "field": "savings_usd", "amount": 250.5},
            {"type": "TRANSFER", "from": "savings_cny", "to": "btc", "amount": 100.5}
        ]"#,
    )
    .unwrap();

    assert_eq!(actions[0], adjust("savings_usd", dec!(250.5)));
    assert_eq!(actions[1], transfer("savings_cny", "btc", dec!(100.5)));
}

#[test]
fn test_out_of_range_actions_are_skipped() {
    let large = Decimal::from_scientific("1e24").unwrap();
    let holdings =
        HoldingsSnapshot::from_amounts([("savings_usd", Decimal::MAX), ("btc", large)]).unwrap();

    let result = simulate(
        &holdings,
        &[adjust("savings_usd", dec!(1)), transfer("btc", "savings_usd", large)],
        &rates(),
        &AssetRegistry::new(),
        None,
    );

    assert_eq!(result.simulated_holdings, holdings);
    assert_eq!(
        result.logs,
        vec![
            "Skipped adjustment of Savings (USD): amount out of range".to_string(),
            "Skipped transfer Bitcoin -> Savings (USD): amount out of range".to_string(),
        ]
    );
}
