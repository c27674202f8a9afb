//! # aula-grading
//!
//! The grade aggregation and weighting engine. Turns raw per-activity
//! scores into category averages, a weighted final grade, an audit trail of
//! every change, and cached section-level statistics.
//!
//! On a score write the pipeline runs the ledger upsert, a best-effort
//! audit append, category aggregation, then final grade composition,
//! serialized per (enrollment, section).

pub mod aggregator;
pub mod calculator;
pub mod pipeline;
pub mod stats;

pub use aggregator::CategoryAggregator;
pub use calculator::FinalGradeCalculator;
pub use pipeline::{GradingPipeline, ScoreWriteOutcome};
pub use stats::SectionStatsCache;
