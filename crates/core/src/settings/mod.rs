//! Engine configuration loaded from a camelCase JSON document.

mod settings_model;

pub use settings_model::*;

#[cfg(test)]
mod settings_model_tests;
