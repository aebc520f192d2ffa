use serde::{Deserialize, Serialize};

use crate::rebalancing::RebalancingSuggestion;
use crate::valuation::ValuationResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub valuation: ValuationResult,
    pub suggestions: Vec<RebalancingSuggestion>,
}
