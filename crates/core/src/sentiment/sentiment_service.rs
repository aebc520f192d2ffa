use log::{info, warn};
use std::sync::Arc;

use assetwise_market_data::{FearGreedIndex, SentimentProvider};

use super::sentiment_model::{SentimentReading, SentimentVerdict, SentimentZone};

/// Classify a Fear & Greed value (0-100).
pub fn interpret_fear_greed(value: u8) -> SentimentReading {
    let (zone, verdict, summary) = if value < 20 {
        (
            SentimentZone::ExtremeFear,
            SentimentVerdict::AccumulateInTranches,
            "Market in extreme fear; accumulate in tranches while controlling risk",
        )
    } else if value < 40 {
        (
            SentimentZone::Fear,
            SentimentVerdict::DollarCostAverage,
            "Market in fear; sentiment leans bearish, dollar-cost average",
        )
    } else if value > 75 {
        (
            SentimentZone::ExtremeGreed,
            SentimentVerdict::PauseBuying,
            "Market in extreme greed; pullback risk is elevated, pause buying",
        )
    } else {
        (
            SentimentZone::Neutral,
            SentimentVerdict::HoldWithLongIntervals,
            "Market sentiment neutral; hold and buy at long intervals",
        )
    };

    SentimentReading {
        value: Some(value),
        zone: Some(zone),
        classification: None,
        verdict,
        summary: format!("Fear & Greed {}: {}", value, summary),
    }
}

/// Classify a provider reading, keeping the provider's own label.
pub fn interpret_index(index: &FearGreedIndex) -> SentimentReading {
    SentimentReading {
        classification: Some(index.classification.clone()),
        ..interpret_fear_greed(index.value)
    }
}

/// Fetches the latest index and interprets it.
pub struct SentimentService {
    provider: Arc<dyn SentimentProvider>,
}

impl SentimentService {
    pub fn new(provider: Arc<dyn SentimentProvider>) -> Self {
        Self { provider }
    }

    /// Current reading; provider failures yield
    /// [`SentimentVerdict::InsufficientData`] rather than an error.
    pub async fn current_reading(&self) -> SentimentReading {
        match self.provider.get_fear_greed_index().await {
            Ok(index) => {
                info!(
                    "Fear & Greed index from {}: {} ({})",
                    self.provider.id(),
                    index.value,
                    index.classification
                );
                interpret_index(&index)
            }
            Err(e) => {
                warn!(
                    "Fear & Greed index from {} unavailable: {}",
                    self.provider.id(),
                    e
                );
                SentimentReading::insufficient_data()
            }
        }
    }
}
