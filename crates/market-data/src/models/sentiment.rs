use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Crypto Fear & Greed index reading (0 = extreme fear, 100 = extreme greed).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FearGreedIndex {
    pub value: u8,

    /// Provider's own label, e.g. "Extreme Fear"
    pub classification: String,

    pub timestamp: DateTime<Utc>,
}
