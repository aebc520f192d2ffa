use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::analysis_model::AnalysisReport;
use crate::errors::Result;
use crate::fx::RateBook;
use crate::holdings::HoldingsSnapshot;
use crate::rebalancing::RebalancingAdvisor;
use crate::registry::AssetRegistry;
use crate::risk::{RiskFactorCache, RiskFactorSource};
use crate::settings::EngineSettings;
use crate::simulation::{simulate, SimulationAction, SimulationResult};
use crate::valuation::normalize;

/// Ties the shared state together for one request.
///
/// Reads never wait on a refresh: the rate table is copied out of the
/// [`RateBook`] and the risk factor is whatever the cache holds right now.
pub struct AnalysisService {
    settings: EngineSettings,
    registry: Arc<AssetRegistry>,
    advisor: RebalancingAdvisor,
    rate_book: Arc<RateBook>,
    risk_cache: Arc<RiskFactorCache>,
}

impl AnalysisService {
    pub fn new(
        settings: EngineSettings,
        registry: Arc<AssetRegistry>,
        rate_book: Arc<RateBook>,
        risk_cache: Arc<RiskFactorCache>,
    ) -> Self {
        let advisor = settings.advisor(&registry);
        Self {
            settings,
            registry,
            advisor,
            rate_book,
            risk_cache,
        }
    }

    /// Build the registry and a cold risk cache from `settings`.
    pub fn from_settings(settings: EngineSettings, rate_book: Arc<RateBook>) -> Result<Self> {
        settings.validate()?;
        let registry = Arc::new(settings.build_registry()?);
        let risk_cache = Arc::new(RiskFactorCache::new(settings.risk_cache_ttl()));
        Ok(Self::new(settings, registry, rate_book, risk_cache))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn registry(&self) -> Arc<AssetRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn risk_cache(&self) -> Arc<RiskFactorCache> {
        Arc::clone(&self.risk_cache)
    }

    fn current_btc_risk(&self) -> Option<Decimal> {
        let risk = self.risk_cache.get().map(|factor| factor.value());
        if risk.is_none() {
            debug!("No fresh BTC risk factor cached, using static weight");
        }
        risk
    }

    /// Value `snapshot` and advise against the configured targets.
    pub fn analyze(&self, snapshot: &HoldingsSnapshot) -> AnalysisReport {
        let rates = self.rate_book.current();
        let valuation = normalize(snapshot, &rates, &self.registry, self.current_btc_risk());
        let suggestions = self.advisor.advise(
            &valuation,
            &self.settings.target_allocation,
            self.settings.rebalance_threshold,
            &rates,
            &self.settings.fx_reference,
        );
        AnalysisReport {
            valuation,
            suggestions,
        }
    }

    /// Run a what-if simulation against the current rates and risk factor.
    pub fn simulate(
        &self,
        snapshot: &HoldingsSnapshot,
        actions: &[SimulationAction],
    ) -> SimulationResult {
        let rates = self.rate_book.current();
        simulate(snapshot, actions, &rates, &self.registry, self.current_btc_risk())
    }
}
