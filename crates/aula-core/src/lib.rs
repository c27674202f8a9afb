//! # aula-core
//!
//! Foundation crate for the aula grade aggregation engine.
//! Defines all models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::GradingConfig;
pub use errors::{AulaError, AulaResult};
pub use models::{
    AuditEntry, AuditRecord, CategoryAverage, CategoryWeight, EvaluationCategory, FinalGrade,
    GradePoints, Percent, RawScore, ScoreChange, SectionStatistic,
};
