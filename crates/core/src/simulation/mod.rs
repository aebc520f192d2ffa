//! What-if simulation: apply hypothetical actions to a copy of the holdings
//! and compare valuations.

mod simulation_model;
mod simulation_service;

pub use simulation_model::*;
pub use simulation_service::*;

#[cfg(test)]
mod simulation_service_tests;
