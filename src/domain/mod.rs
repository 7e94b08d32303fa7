//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod features;
pub mod model;
pub mod metrics;
pub mod prediction;
pub mod pipeline;
pub mod config_validation;
pub mod error;
