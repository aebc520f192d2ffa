use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate USD valuation of one holdings snapshot.
///
/// Ratios are percentages (0-100) except `weighted_risk_score`, which stays on
/// the 0-10 risk scale. When `total_assets_usd` is zero every ratio is zero.
/// Values are exact decimals internally and serialize as JSON numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub total_assets_usd: Decimal,
    /// Liquid subset of `total_assets_usd`
    pub total_savings_usd: Decimal,
    pub available_liquidity_ratio: Decimal,
    pub gold_ratio: Decimal,
    pub btc_ratio: Decimal,
    pub weighted_risk_score: Decimal,
    /// Share of assets whose effective risk weight is above 5
    pub speculative_ratio: Decimal,
    /// Settlement currency -> percentage of total, rounded to 2 dp
    pub currency_distribution: BTreeMap<String, Decimal>,
    /// Holding field -> USD value, for every holding that was counted
    pub asset_values_usd: BTreeMap<String, Decimal>,
    /// Dynamic risk factor applied to BTC-class holdings, if one was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_btc_risk: Option<Decimal>,
}

impl ValuationResult {
    pub fn has_assets(&self) -> bool {
        !self.total_assets_usd.is_zero()
    }

    /// Percentage share of a settlement currency, zero when absent.
    pub fn currency_pct(&self, currency: &str) -> Decimal {
        self.currency_distribution
            .get(currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}
