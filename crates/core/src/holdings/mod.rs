//! Holdings snapshot - raw amounts per holding field.

mod holdings_model;

pub use holdings_model::*;
