use log::{info, warn};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use assetwise_market_data::ExchangeRateProvider;

use super::rate_table::RateTable;
use crate::errors::Result;

/// Process-wide holder of the latest rate table.
///
/// A refresh job replaces the table wholesale; each valuation takes a copy
/// with [`RateBook::current`] so the table cannot change mid-pass.
#[derive(Debug, Default)]
pub struct RateBook {
    table: RwLock<RateTable>,
}

impl RateBook {
    pub fn new(initial: RateTable) -> Self {
        Self {
            table: RwLock::new(initial),
        }
    }

    fn read_table(&self) -> RwLockReadGuard<'_, RateTable> {
        self.table.read().unwrap_or_else(|poisoned| {
            warn!("Rate book lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, RateTable> {
        self.table.write().unwrap_or_else(|poisoned| {
            warn!("Rate book lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Copy of the current table.
    pub fn current(&self) -> RateTable {
        self.read_table().clone()
    }

    pub fn replace(&self, table: RateTable) {
        *self.write_table() = table;
    }

    /// Fetch the latest rates and swap them in.
    ///
    /// On failure the previous table stays in place and the error is returned
    /// to the scheduler.
    pub async fn refresh(&self, provider: &dyn ExchangeRateProvider) -> Result<usize> {
        match provider.get_latest_rates().await {
            Ok(latest) => {
                let table = RateTable::from(latest);
                let count = table.len();
                self.replace(table);
                info!("Rate book refreshed from {} ({} rates)", provider.id(), count);
                Ok(count)
            }
            Err(e) => {
                warn!(
                    "Rate refresh from {} failed, keeping previous rates: {}",
                    provider.id(),
                    e
                );
                Err(e.into())
            }
        }
    }
}
