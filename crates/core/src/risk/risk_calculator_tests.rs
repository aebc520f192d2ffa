use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn flat_series(len: usize, price: Decimal) -> Vec<Decimal> {
    vec![price; len]
}

/// A flat year followed by a single drop to `last`.
fn flat_then_drop(len: usize, last: Decimal) -> Vec<Decimal> {
    let mut prices = flat_series(len - 1, dec!(100));
    prices.push(last);
    prices
}

#[test]
fn test_short_history_is_fail_safe() {
    let prices = flat_series(59, dec!(100));
    let assessment = assess_risk(&prices, &RiskFactorSettings::default());

    assert!(assessment.fail_safe);
    assert_eq!(assessment.factor, RiskFactor::MAX);
    assert_eq!(assessment.factor.value(), dec!(10));
    assert_eq!(assessment.observations, 59);
}

#[test]
fn test_empty_history_is_fail_safe() {
    assert_eq!(compute_risk_factor_default(&[]), RiskFactor::MAX);
}

#[test]
fn test_non_positive_price_is_fail_safe() {
    let mut prices = flat_series(100, dec!(100));
    prices[50] = Decimal::ZERO;

    let assessment = assess_risk(&prices, &RiskFactorSettings::default());
    assert!(assessment.fail_safe);
    assert_eq!(assessment.factor, RiskFactor::MAX);
}

#[test]
fn test_extreme_price_ratio_is_fail_safe() {
    let mut prices = flat_series(400, dec!(0.0000001));
    prices.push(Decimal::from_scientific("1e23").unwrap());

    assert_eq!(log_returns(&prices), None);
    assert_eq!(compute_risk_factor_default(&prices), RiskFactor::MAX);
}

#[test]
fn test_flat_prices_have_zero_risk() {
    let prices = flat_series(60, dec!(42000));
    let assessment = assess_risk(&prices, &RiskFactorSettings::default());

    assert!(!assessment.fail_safe);
    assert_eq!(assessment.current_volatility, Decimal::ZERO);
    assert_eq!(assessment.current_drawdown, Decimal::ZERO);
    assert_eq!(assessment.factor.value(), Decimal::ZERO);
}

#[test]
fn test_rising_prices_have_no_drawdown_component() {
    let prices: Vec<Decimal> = (1..=120).map(|t| Decimal::from(100 + t)).collect();
    let assessment = assess_risk(&prices, &RiskFactorSettings::default());

    assert!(!assessment.fail_safe);
    assert_eq!(assessment.drawdown_score, Decimal::ZERO);
    assert!(assessment.factor.value() <= dec!(6));
}

#[test]
fn test_crash_saturates_drawdown_score() {
    let prices = flat_then_drop(100, dec!(30));
    let assessment = assess_risk(&prices, &RiskFactorSettings::default());

    assert_eq!(assessment.current_drawdown, dec!(0.7));
    assert_eq!(assessment.drawdown_score, dec!(10));
    // 69 of 70 rolling volatilities sit below the current one:
    // 0.6 * 9.857 + 0.4 * 10
    assert_eq!(assessment.factor.value(), dec!(9.91));
}

#[test]
fn test_half_saturated_drawdown() {
    let prices = flat_then_drop(100, dec!(65));
    let assessment = assess_risk(&prices, &RiskFactorSettings::default());

    assert_eq!(assessment.current_drawdown, dec!(0.35));
    assert_eq!(assessment.drawdown_score, dec!(5));
    assert_eq!(assessment.factor.value(), dec!(7.91));
}

#[test]
fn test_drawdown_outside_lookback_is_ignored() {
    let mut prices = flat_series(100, dec!(100));
    prices[80] = dec!(50);

    let drawdown = worst_recent_drawdown(&prices, 365, 5);
    assert_eq!(drawdown, Decimal::ZERO);
}

#[test]
fn test_drawdown_uses_trailing_window_peak() {
    // The old peak of 200 falls out of a 3-price window.
    let prices = vec![dec!(200), dec!(100), dec!(100), dec!(100), dec!(90)];
    assert_eq!(worst_recent_drawdown(&prices, 3, 1), dec!(0.1));
    assert_eq!(worst_recent_drawdown(&prices, 365, 1), dec!(0.55));
}

#[test]
fn test_factor_is_deterministic_and_in_range() {
    let prices: Vec<Decimal> = (0..400u32)
        .map(|t| Decimal::from(1000 + (t * 37) % 101) + Decimal::from(t))
        .collect();

    let first = compute_risk_factor_default(&prices);
    let second = compute_risk_factor_default(&prices);

    assert_eq!(first, second);
    assert!(first.value() >= Decimal::ZERO);
    assert!(first.value() <= dec!(10));
    assert_eq!(first.value(), first.value().round_dp(2));
}

#[test]
fn test_custom_settings_lower_required_observations() {
    let settings = RiskFactorSettings {
        vol_window: 5,
        vol_smoothing: 2,
        min_observations: 10,
        ..RiskFactorSettings::default()
    };
    assert_eq!(settings.required_observations(), 10);

    let prices = flat_series(10, dec!(100));
    assert_eq!(compute_risk_factor(&prices, &settings).value(), Decimal::ZERO);
}

#[test]
fn test_required_observations_never_below_window() {
    let settings = RiskFactorSettings {
        min_observations: 0,
        ..RiskFactorSettings::default()
    };
    assert_eq!(settings.required_observations(), 35);
}

#[test]
fn test_percentile_interpolates() {
    let sorted = vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];
    assert_eq!(percentile(&sorted, dec!(50)), Some(dec!(3)));
    assert_eq!(percentile(&sorted, dec!(25)), Some(dec!(2)));
    assert_eq!(percentile(&[dec!(0), dec!(10)], dec!(1)), Some(dec!(0.1)));
    assert_eq!(percentile(&[], dec!(50)), None);
}

#[test]
fn test_winsorize_clips_outliers() {
    let mut values = vec![Decimal::ZERO; 99];
    values.push(dec!(-1));

    let clipped = winsorize(&values, dec!(1), dec!(99));
    let min = clipped.iter().copied().min().unwrap();
    assert!(min > dec!(-1));
    assert!(min < Decimal::ZERO);
}

#[test]
fn test_rolling_std_uses_sample_deviation() {
    let values = vec![dec!(1), dec!(3)];
    let rolling = rolling_std(&values, 2);
    // sqrt(((1-2)^2 + (3-2)^2) / 1)
    assert_eq!(rolling.len(), 1);
    assert_eq!(rolling[0].round_dp(10), dec!(1.4142135624));
}

#[test]
fn test_percentile_rank_counts_strictly_below() {
    let history = vec![dec!(1), dec!(2), dec!(2), dec!(3)];
    assert_eq!(percentile_rank(&history, dec!(2)), dec!(0.25));
    assert_eq!(percentile_rank(&history, dec!(4)), Decimal::ONE);
    assert_eq!(percentile_rank(&[], dec!(4)), Decimal::ZERO);
}

#[test]
fn test_settings_validation() {
    assert!(RiskFactorSettings::default().validate().is_ok());

    let bad_weights = RiskFactorSettings {
        vol_weight: dec!(0.5),
        ..RiskFactorSettings::default()
    };
    assert!(bad_weights.validate().is_err());

    let bad_window = RiskFactorSettings {
        vol_window: 1,
        ..RiskFactorSettings::default()
    };
    assert!(bad_window.validate().is_err());

    let bad_percentiles = RiskFactorSettings {
        winsorize_lower_pct: dec!(99),
        winsorize_upper_pct: dec!(1),
        ..RiskFactorSettings::default()
    };
    assert!(bad_percentiles.validate().is_err());
}
