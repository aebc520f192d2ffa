//! Market sentiment from the Crypto Fear & Greed index.

mod sentiment_model;
mod sentiment_service;

pub use sentiment_model::*;
pub use sentiment_service::*;
