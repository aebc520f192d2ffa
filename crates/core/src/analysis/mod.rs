//! Request-time analysis: valuation plus rebalancing advice against the
//! currently published rates and risk factor.

mod analysis_model;
mod analysis_service;

pub use analysis_model::*;
pub use analysis_service::*;
