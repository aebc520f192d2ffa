//! Drift-based rebalancing advice, modulated by FX valuation.

mod rebalancing_advisor;
mod rebalancing_model;

pub use rebalancing_advisor::*;
pub use rebalancing_model::*;
