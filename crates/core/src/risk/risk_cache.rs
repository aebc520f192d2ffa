use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use super::risk_model::RiskFactor;
use super::risk_traits::RiskFactorSource;
use crate::constants::BTC_RISK_CACHE_KEY;

/// Default lifetime of a published risk factor (12 hours).
pub const DEFAULT_RISK_CACHE_TTL: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Debug, Clone, Copy)]
struct CachedFactor {
    factor: RiskFactor,
    stored_at: Instant,
    computed_at: DateTime<Utc>,
}

/// Process-wide slot for the latest dynamic BTC risk factor.
///
/// Writers replace the value wholesale; readers see either a fresh value or
/// nothing. Expiry is checked against a monotonic clock on every read.
#[derive(Debug)]
pub struct RiskFactorCache {
    slot: RwLock<Option<CachedFactor>>,
    ttl: Duration,
}

impl Default for RiskFactorCache {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_CACHE_TTL)
    }
}

impl RiskFactorCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn read_slot(&self) -> RwLockReadGuard<'_, Option<CachedFactor>> {
        self.slot.read().unwrap_or_else(|poisoned| {
            warn!("{} cache lock was poisoned, recovering", BTC_RISK_CACHE_KEY);
            poisoned.into_inner()
        })
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Option<CachedFactor>> {
        self.slot.write().unwrap_or_else(|poisoned| {
            warn!("{} cache lock was poisoned, recovering", BTC_RISK_CACHE_KEY);
            poisoned.into_inner()
        })
    }

    pub fn store(&self, factor: RiskFactor) {
        *self.write_slot() = Some(CachedFactor {
            factor,
            stored_at: Instant::now(),
            computed_at: Utc::now(),
        });
        debug!("Stored {} = {}", BTC_RISK_CACHE_KEY, factor);
    }

    /// The cached factor if it has not expired.
    pub fn get_fresh(&self) -> Option<RiskFactor> {
        let slot = self.read_slot();
        let cached = slot.as_ref()?;
        if cached.stored_at.elapsed() < self.ttl {
            Some(cached.factor)
        } else {
            debug!(
                "{} expired (computed at {})",
                BTC_RISK_CACHE_KEY, cached.computed_at
            );
            None
        }
    }

    /// When the currently cached value was computed, fresh or not.
    pub fn computed_at(&self) -> Option<DateTime<Utc>> {
        self.read_slot().as_ref().map(|cached| cached.computed_at)
    }

    pub fn invalidate(&self) {
        *self.write_slot() = None;
    }
}

impl RiskFactorSource for RiskFactorCache {
    fn get(&self) -> Option<RiskFactor> {
        self.get_fresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_cache_has_no_factor() {
        let cache = RiskFactorCache::default();
        assert_eq!(cache.get(), None);
        assert_eq!(cache.computed_at(), None);
    }

    #[test]
    fn test_store_then_get() {
        let cache = RiskFactorCache::new(Duration::from_secs(60));
        cache.store(RiskFactor::new(dec!(7.25)));
        assert_eq!(cache.get(), Some(RiskFactor::new(dec!(7.25))));
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let cache = RiskFactorCache::new(Duration::ZERO);
        cache.store(RiskFactor::new(dec!(3)));
        assert_eq!(cache.get(), None);
        assert!(cache.computed_at().is_some());
    }

    #[test]
    fn test_invalidate_clears_value() {
        let cache = RiskFactorCache::new(Duration::from_secs(60));
        cache.store(RiskFactor::MAX);
        cache.invalidate();
        assert_eq!(cache.get(), None);
    }
}
