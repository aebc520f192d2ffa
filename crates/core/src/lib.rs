//! Assetwise Core - valuation, dynamic risk scoring and rebalancing advice.
//!
//! The request-time passes are pure functions:
//!
//! - [`normalize`] values a [`HoldingsSnapshot`] in USD and derives
//!   liquidity, concentration and risk ratios
//! - [`compute_risk_factor`] scores the BTC price history on a 0-10 scale
//! - [`advise`] compares the currency distribution against target weights
//! - [`simulate`] replays hypothetical actions on a copy of the holdings
//!
//! Shared state (the [`RateBook`] and the [`RiskFactorCache`]) is written by
//! background refresh jobs and only read during a request.

pub mod analysis;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod holdings;
pub mod rebalancing;
pub mod registry;
pub mod risk;
pub mod scheduler;
pub mod sentiment;
pub mod settings;
pub mod simulation;
pub mod valuation;

pub use analysis::{AnalysisReport, AnalysisService};
pub use fx::{RateBook, RateTable};
pub use holdings::HoldingsSnapshot;
pub use rebalancing::{advise, evaluate_fx_status, RebalancingAdvisor, RebalancingSuggestion};
pub use registry::AssetRegistry;
pub use risk::{
    compute_risk_factor, compute_risk_factor_default, RiskFactor, RiskFactorCache,
    RiskFactorSource, RiskRefreshService,
};
pub use sentiment::{interpret_fear_greed, SentimentReading, SentimentService};
pub use settings::EngineSettings;
pub use simulation::{simulate, SimulationAction, SimulationResult};
pub use valuation::{normalize, normalize_with_source, ValuationResult};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
