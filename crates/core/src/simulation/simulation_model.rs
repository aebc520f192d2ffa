use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::HoldingsSnapshot;
use crate::valuation::ValuationResult;

/// A hypothetical change to the holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulationAction {
    /// Add `amount` (may be negative) to a field, flooring at zero.
    #[serde(rename_all = "camelCase")]
    Adjust { field: String, amount: Decimal },
    /// Move value between two fields, converting through USD.
    #[serde(rename_all = "camelCase")]
    Transfer {
        from: String,
        to: String,
        amount: Decimal,
    },
}

/// Change of the headline metrics, simulated minus original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationDiff {
    pub total_assets_usd: Decimal,
    pub weighted_risk_score: Decimal,
    pub available_liquidity_ratio: Decimal,
    pub btc_ratio: Decimal,
}

impl SimulationDiff {
    pub fn between(original: &ValuationResult, simulated: &ValuationResult) -> Self {
        Self {
            total_assets_usd: simulated.total_assets_usd - original.total_assets_usd,
            weighted_risk_score: simulated.weighted_risk_score - original.weighted_risk_score,
            available_liquidity_ratio: simulated.available_liquidity_ratio
                - original.available_liquidity_ratio,
            btc_ratio: simulated.btc_ratio - original.btc_ratio,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub original: ValuationResult,
    pub simulated: ValuationResult,
    pub simulated_holdings: HoldingsSnapshot,
    /// One line per applied or skipped action
    pub logs: Vec<String>,
    pub diff: SimulationDiff,
}
