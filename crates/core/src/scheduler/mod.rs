//! Background refresh of FX rates and the dynamic risk factor.
//!
//! Rates refresh on the configured interval. The risk factor refreshes at
//! half its cache TTL so a healthy provider keeps the cache warm.

mod refresh_scheduler;

pub use refresh_scheduler::*;
