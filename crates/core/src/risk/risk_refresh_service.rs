use log::{error, info, warn};
use std::sync::Arc;

use assetwise_market_data::{PriceHistoryProvider, PricePoint};

use super::risk_cache::RiskFactorCache;
use super::risk_calculator::assess_risk;
use super::risk_model::{RiskAssessment, RiskFactorSettings};
use crate::errors::Result;

/// Recomputes the dynamic BTC risk factor from daily price history and
/// publishes it to a [`RiskFactorCache`].
pub struct RiskRefreshService {
    provider: Arc<dyn PriceHistoryProvider>,
    cache: Arc<RiskFactorCache>,
    settings: RiskFactorSettings,
}

impl RiskRefreshService {
    pub fn new(
        provider: Arc<dyn PriceHistoryProvider>,
        cache: Arc<RiskFactorCache>,
        settings: RiskFactorSettings,
    ) -> Self {
        Self {
            provider,
            cache,
            settings,
        }
    }

    pub fn cache(&self) -> Arc<RiskFactorCache> {
        Arc::clone(&self.cache)
    }

    /// Fetch, compute and publish.
    ///
    /// A fail-safe assessment (history too short or invalid) is returned but
    /// not published, so readers fall back to the static registry weight.
    /// Provider errors leave the cache untouched.
    pub async fn refresh(&self) -> Result<RiskAssessment> {
        let history = match self.provider.get_price_history().await {
            Ok(history) => history,
            Err(e) => {
                if e.retry_class().is_transient() {
                    warn!(
                        "Risk refresh from {} failed, will retry on next schedule: {}",
                        self.provider.id(),
                        e
                    );
                } else {
                    error!(
                        "Risk refresh from {} failed permanently: {}",
                        self.provider.id(),
                        e
                    );
                }
                return Err(e.into());
            }
        };

        let prices = PricePoint::closes(&history);
        let assessment = assess_risk(&prices, &self.settings);

        if assessment.fail_safe {
            warn!(
                "Risk factor from {} observations is the fail-safe value, not publishing",
                assessment.observations
            );
        } else {
            self.cache.store(assessment.factor);
            info!(
                "Published BTC risk factor {} (vol score {}, drawdown score {}, {} observations)",
                assessment.factor,
                assessment.volatility_score.round_dp(2),
                assessment.drawdown_score.round_dp(2),
                assessment.observations
            );
        }
        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::risk::{RiskFactor, RiskFactorSource};
    use assetwise_market_data::MarketDataError;
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    enum History {
        Prices(Vec<Decimal>),
        RateLimited,
    }

    #[async_trait]
    impl PriceHistoryProvider for History {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn get_price_history(
            &self,
        ) -> std::result::Result<Vec<PricePoint>, MarketDataError> {
            match self {
                History::Prices(prices) => {
                    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
                    // newest first, the service must sort
                    Ok(prices
                        .iter()
                        .enumerate()
                        .rev()
                        .map(|(day, close)| {
                            PricePoint::new(start + ChronoDuration::days(day as i64), *close)
                        })
                        .collect())
                }
                History::RateLimited => Err(MarketDataError::RateLimited {
                    provider: "MOCK".to_string(),
                }),
            }
        }
    }

    fn service(history: History, cache: Arc<RiskFactorCache>) -> RiskRefreshService {
        RiskRefreshService::new(Arc::new(history), cache, RiskFactorSettings::default())
    }

    #[tokio::test]
    async fn test_refresh_publishes_factor() {
        let cache = Arc::new(RiskFactorCache::new(Duration::from_secs(60)));
        let mut prices = vec![dec!(100); 99];
        prices.push(dec!(30));

        let assessment = service(History::Prices(prices), Arc::clone(&cache))
            .refresh()
            .await
            .unwrap();

        assert_eq!(assessment.factor.value(), dec!(9.91));
        assert_eq!(cache.get(), Some(assessment.factor));
    }

    #[tokio::test]
    async fn test_fail_safe_is_not_published() {
        let cache = Arc::new(RiskFactorCache::new(Duration::from_secs(60)));
        let assessment = service(History::Prices(vec![dec!(100); 20]), Arc::clone(&cache))
            .refresh()
            .await
            .unwrap();

        assert!(assessment.fail_safe);
        assert_eq!(cache.get(), None);
    }

    #[tokio::test]
    async fn test_provider_error_keeps_cached_factor() {
        let cache = Arc::new(RiskFactorCache::new(Duration::from_secs(60)));
        cache.store(RiskFactor::new(dec!(4.2)));

        let result = service(History::RateLimited, Arc::clone(&cache)).refresh().await;

        assert!(matches!(result, Err(Error::MarketData(_))));
        assert_eq!(cache.get(), Some(RiskFactor::new(dec!(4.2))));
    }
}
