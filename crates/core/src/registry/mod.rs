//! Asset registry - static metadata for every holding field.

mod asset_registry;
mod registry_model;

pub use asset_registry::*;
pub use registry_model::*;
