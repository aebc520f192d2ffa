//! Dynamic risk factor for the volatile reference asset (BTC).
//!
//! The calculator turns a daily price history into a 0-10 weight. A refresh
//! job publishes it to [`RiskFactorCache`]; valuations read it through the
//! [`RiskFactorSource`] capability and never wait for a computation.

mod risk_cache;
mod risk_calculator;
mod risk_model;
mod risk_refresh_service;
mod risk_traits;

pub use risk_cache::*;
pub use risk_calculator::*;
pub use risk_model::*;
pub use risk_refresh_service::*;
pub use risk_traits::*;

#[cfg(test)]
mod risk_calculator_tests;
