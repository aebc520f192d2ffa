use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_RISK_WEIGHT;
use crate::errors::{Error, Result};

/// A risk weight on the 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskFactor(Decimal);

impl RiskFactor {
    /// Maximal caution; the fail-safe when history is unusable.
    pub const MAX: RiskFactor = RiskFactor(MAX_RISK_WEIGHT);

    /// Build a factor, clamping into [0, 10].
    pub fn new(value: Decimal) -> Self {
        Self(value.max(Decimal::ZERO).min(MAX_RISK_WEIGHT))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters of the dynamic risk factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskFactorSettings {
    /// Observations per rolling standard deviation
    pub vol_window: usize,
    /// Trailing rolling-volatility values averaged into "current volatility"
    pub vol_smoothing: usize,
    /// Prices per rolling maximum (about one year of daily closes)
    pub drawdown_window: usize,
    /// Trailing daily drawdowns scanned for the worst one
    pub drawdown_lookback: usize,
    /// Lower winsorization percentile (0-100)
    pub winsorize_lower_pct: Decimal,
    /// Upper winsorization percentile (0-100)
    pub winsorize_upper_pct: Decimal,
    /// Drawdown at which the drawdown score saturates at 10
    pub drawdown_saturation: Decimal,
    pub vol_weight: Decimal,
    pub drawdown_weight: Decimal,
    /// Fewer prices than this yields the fail-safe factor
    pub min_observations: usize,
}

impl Default for RiskFactorSettings {
    fn default() -> Self {
        Self {
            vol_window: 30,
            vol_smoothing: 5,
            drawdown_window: 365,
            drawdown_lookback: 5,
            winsorize_lower_pct: dec!(1),
            winsorize_upper_pct: dec!(99),
            drawdown_saturation: dec!(0.70),
            vol_weight: dec!(0.6),
            drawdown_weight: dec!(0.4),
            min_observations: 60,
        }
    }
}

impl RiskFactorSettings {
    pub fn validate(&self) -> Result<()> {
        if self.vol_window < 2 {
            return Err(Error::InvalidConfigValue(
                "risk.volWindow must be at least 2".to_string(),
            ));
        }
        if self.vol_smoothing == 0 || self.drawdown_window == 0 || self.drawdown_lookback == 0 {
            return Err(Error::InvalidConfigValue(
                "risk windows must be positive".to_string(),
            ));
        }
        if self.winsorize_lower_pct < Decimal::ZERO
            || self.winsorize_upper_pct > dec!(100)
            || self.winsorize_lower_pct >= self.winsorize_upper_pct
        {
            return Err(Error::InvalidConfigValue(
                "risk winsorization percentiles must satisfy 0 <= lower < upper <= 100"
                    .to_string(),
            ));
        }
        if self.drawdown_saturation <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(
                "risk.drawdownSaturation must be positive".to_string(),
            ));
        }
        if self.vol_weight < Decimal::ZERO
            || self.drawdown_weight < Decimal::ZERO
            || self.vol_weight + self.drawdown_weight != Decimal::ONE
        {
            return Err(Error::InvalidConfigValue(
                "risk.volWeight and risk.drawdownWeight must be non-negative and sum to 1"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Smallest history that yields enough rolling-volatility observations.
    pub fn required_observations(&self) -> usize {
        self.min_observations
            .max(self.vol_window + self.vol_smoothing)
            .max(self.drawdown_lookback)
    }
}

/// Breakdown of one risk factor computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub factor: RiskFactor,
    /// Mean of the most recent rolling volatilities (daily, not annualized)
    pub current_volatility: Decimal,
    pub volatility_score: Decimal,
    /// Worst recent drawdown from the rolling peak, as a positive fraction
    pub current_drawdown: Decimal,
    pub drawdown_score: Decimal,
    pub observations: usize,
    /// True when the factor is the fail-safe maximum rather than a statistic
    pub fail_safe: bool,
}

impl RiskAssessment {
    pub fn fail_safe(observations: usize) -> Self {
        Self {
            factor: RiskFactor::MAX,
            current_volatility: Decimal::ZERO,
            volatility_score: Decimal::ZERO,
            current_drawdown: Decimal::ZERO,
            drawdown_score: Decimal::ZERO,
            observations,
            fail_safe: true,
        }
    }
}
