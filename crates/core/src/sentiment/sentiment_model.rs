use serde::{Deserialize, Serialize};

/// Band of the 0-100 Fear & Greed scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentZone {
    /// Below 20
    ExtremeFear,
    /// 20 to 39
    Fear,
    /// 40 to 75
    Neutral,
    /// Above 75
    ExtremeGreed,
}

/// Accumulation stance for the volatile reference asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentVerdict {
    AccumulateInTranches,
    DollarCostAverage,
    HoldWithLongIntervals,
    PauseBuying,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReading {
    pub value: Option<u8>,
    pub zone: Option<SentimentZone>,
    /// Provider label, when the reading came from a provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    pub verdict: SentimentVerdict,
    pub summary: String,
}

impl SentimentReading {
    pub fn insufficient_data() -> Self {
        Self {
            value: None,
            zone: None,
            classification: None,
            verdict: SentimentVerdict::InsufficientData,
            summary: "Fear & Greed index unavailable".to_string(),
        }
    }
}
