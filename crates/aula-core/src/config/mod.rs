//! Engine configuration with serde-backed defaults.

pub mod defaults;
pub mod grading_config;

pub use grading_config::GradingConfig;
