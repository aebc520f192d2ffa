use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use assetwise_market_data::ExchangeRateProvider;

use crate::fx::RateBook;
use crate::risk::RiskRefreshService;

/// Outcome of one combined refresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Number of rates loaded, `None` when the rate refresh failed
    pub rates_loaded: Option<usize>,
    /// Whether a new risk factor was published
    pub risk_published: bool,
}

/// The two refresh jobs and their shared state.
pub struct RefreshJobs {
    rate_book: Arc<RateBook>,
    rate_provider: Arc<dyn ExchangeRateProvider>,
    risk_service: Arc<RiskRefreshService>,
}

impl RefreshJobs {
    pub fn new(
        rate_book: Arc<RateBook>,
        rate_provider: Arc<dyn ExchangeRateProvider>,
        risk_service: Arc<RiskRefreshService>,
    ) -> Self {
        Self {
            rate_book,
            rate_provider,
            risk_service,
        }
    }

    pub async fn refresh_rates(&self) -> Option<usize> {
        self.rate_book
            .refresh(self.rate_provider.as_ref())
            .await
            .ok()
    }

    pub async fn refresh_risk(&self) -> bool {
        match self.risk_service.refresh().await {
            Ok(assessment) => !assessment.fail_safe,
            Err(e) => {
                debug!("Risk refresh failed: {}", e);
                false
            }
        }
    }

    /// Run both refreshes concurrently. Failures are logged by the jobs and
    /// leave the previous values in place.
    pub async fn refresh_all(&self) -> RefreshOutcome {
        let (rates_loaded, risk_published) =
            futures::join!(self.refresh_rates(), self.refresh_risk());
        RefreshOutcome {
            rates_loaded,
            risk_published,
        }
    }
}

/// Spawn the periodic refresh loops. Both jobs run once immediately.
///
/// Must be called from within a tokio runtime. Abort the returned handles to
/// stop the loops.
pub fn start_refresh_scheduler(
    jobs: Arc<RefreshJobs>,
    rate_interval: Duration,
    risk_cache_ttl: Duration,
) -> Vec<JoinHandle<()>> {
    let risk_interval = (risk_cache_ttl / 2).max(Duration::from_secs(1));
    info!(
        "Refresh scheduler started (rates every {}s, risk every {}s)",
        rate_interval.as_secs(),
        risk_interval.as_secs()
    );

    let rate_jobs = Arc::clone(&jobs);
    let rates = tokio::spawn(async move {
        let mut ticker = interval(rate_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if rate_jobs.refresh_rates().await.is_none() {
                warn!("Scheduled rate refresh failed, keeping previous rates");
            }
        }
    });

    let risk = tokio::spawn(async move {
        let mut ticker = interval(risk_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            jobs.refresh_risk().await;
        }
    });

    vec![rates, risk]
}
