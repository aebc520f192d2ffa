use log::{debug, warn};
use num_traits::ToPrimitive;
use rust_decimal::prelude::MathematicalOps;
use rust_decimal::{Decimal, RoundingStrategy};

use super::risk_model::{RiskAssessment, RiskFactor, RiskFactorSettings};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, MAX_RISK_WEIGHT, ONE_HUNDRED};

/// Risk factor of a chronologically ordered close-price series.
pub fn compute_risk_factor(prices: &[Decimal], settings: &RiskFactorSettings) -> RiskFactor {
    assess_risk(prices, settings).factor
}

pub fn compute_risk_factor_default(prices: &[Decimal]) -> RiskFactor {
    compute_risk_factor(prices, &RiskFactorSettings::default())
}

/// Scores a daily close-price series on the 0-10 risk scale.
///
/// The score blends two components:
/// - volatility: where the current rolling volatility of winsorized log
///   returns ranks within its own history
/// - drawdown: the worst recent distance from the trailing one-year peak,
///   saturating at `drawdown_saturation`
///
/// Short or invalid (non-positive prices, out-of-range price ratios) series
/// yield [`RiskFactor::MAX`].
pub fn assess_risk(prices: &[Decimal], settings: &RiskFactorSettings) -> RiskAssessment {
    let observations = prices.len();
    if observations < settings.required_observations() {
        debug!(
            "Insufficient price history for risk factor: {} < {}",
            observations,
            settings.required_observations()
        );
        return RiskAssessment::fail_safe(observations);
    }

    let Some(returns) = log_returns(prices) else {
        warn!("Price history contains non-positive or out-of-range prices, using fail-safe risk factor");
        return RiskAssessment::fail_safe(observations);
    };

    // --- Volatility component ---
    let clipped = winsorize(
        &returns,
        settings.winsorize_lower_pct,
        settings.winsorize_upper_pct,
    );
    let rolling = rolling_std(&clipped, settings.vol_window);
    if rolling.len() < settings.vol_smoothing {
        return RiskAssessment::fail_safe(observations);
    }
    let current_volatility = mean(&rolling[rolling.len() - settings.vol_smoothing..]);
    let volatility_score = percentile_rank(&rolling, current_volatility) * MAX_RISK_WEIGHT;

    // --- Drawdown component ---
    let current_drawdown = worst_recent_drawdown(
        prices,
        settings.drawdown_window,
        settings.drawdown_lookback,
    );
    let drawdown_score =
        (current_drawdown / settings.drawdown_saturation * MAX_RISK_WEIGHT).min(MAX_RISK_WEIGHT);

    let blended = volatility_score * settings.vol_weight + drawdown_score * settings.drawdown_weight;
    let rounded = blended
        .max(Decimal::ZERO)
        .min(MAX_RISK_WEIGHT)
        .round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero);

    RiskAssessment {
        factor: RiskFactor::new(rounded),
        current_volatility,
        volatility_score,
        current_drawdown,
        drawdown_score,
        observations,
        fail_safe: false,
    }
}

/// `ln(p[t] / p[t-1])` for consecutive prices.
///
/// `None` if any price is not positive or a ratio leaves the decimal range.
pub fn log_returns(prices: &[Decimal]) -> Option<Vec<Decimal>> {
    if prices.iter().any(|p| *p <= Decimal::ZERO) {
        return None;
    }
    prices
        .windows(2)
        .map(|pair| pair[1].checked_div(pair[0]).and_then(|ratio| ratio.checked_ln()))
        .collect()
}

/// Clip values to the given lower/upper percentiles.
pub fn winsorize(values: &[Decimal], lower_pct: Decimal, upper_pct: Decimal) -> Vec<Decimal> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let (Some(low), Some(high)) = (
        percentile(&sorted, lower_pct),
        percentile(&sorted, upper_pct),
    ) else {
        return values.to_vec();
    };
    values.iter().map(|v| (*v).max(low).min(high)).collect()
}

/// Percentile of sorted data with linear interpolation between order statistics.
pub fn percentile(sorted: &[Decimal], pct: Decimal) -> Option<Decimal> {
    let last = sorted.len().checked_sub(1)?;
    let rank = pct / ONE_HUNDRED * Decimal::from(last);
    let lower = rank.floor().to_usize()?.min(last);
    let upper = rank.ceil().to_usize()?.min(last);
    let fraction = rank - Decimal::from(lower);
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Sample standard deviation of every full trailing window.
pub fn rolling_std(values: &[Decimal], window: usize) -> Vec<Decimal> {
    if window < 2 || values.len() < window {
        return Vec::new();
    }
    values.windows(window).map(sample_std).collect()
}

fn sample_std(values: &[Decimal]) -> Decimal {
    let avg = mean(values);
    let sum_squared_diff: Decimal = values
        .iter()
        .map(|v| {
            let diff = *v - avg;
            diff * diff
        })
        .sum();
    let variance = sum_squared_diff / Decimal::from(values.len() - 1);
    variance.sqrt().unwrap_or(Decimal::ZERO)
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}

/// Fraction (0-1) of `history` strictly below `value`.
pub fn percentile_rank(history: &[Decimal], value: Decimal) -> Decimal {
    if history.is_empty() {
        return Decimal::ZERO;
    }
    let below = history.iter().filter(|v| **v < value).count();
    Decimal::from(below) / Decimal::from(history.len())
}

/// Absolute value of the worst drawdown among the last `lookback` prices,
/// each measured against the maximum of its trailing `window` prices.
pub fn worst_recent_drawdown(prices: &[Decimal], window: usize, lookback: usize) -> Decimal {
    let n = prices.len();
    let start = n.saturating_sub(lookback);
    let mut worst = Decimal::ZERO;
    for t in start..n {
        let from = (t + 1).saturating_sub(window);
        let peak = prices[from..=t]
            .iter()
            .copied()
            .max()
            .unwrap_or(prices[t]);
        if peak.is_zero() {
            continue;
        }
        let drawdown = prices[t] / peak - Decimal::ONE;
        worst = worst.min(drawdown);
    }
    worst.abs()
}
