//! Data model for the grade aggregation engine.

pub mod audit_entry;
pub mod category;
pub mod category_average;
pub mod final_grade;
pub mod percent;
pub mod raw_score;
pub mod score_change;
pub mod section_statistic;
pub mod weight;

pub use audit_entry::{AuditEntry, AuditRecord};
pub use category::EvaluationCategory;
pub use category_average::CategoryAverage;
pub use final_grade::{CategoryBreakdown, CategorySummary, FinalGrade};
pub use percent::{GradePoints, Percent};
pub use raw_score::RawScore;
pub use score_change::ScoreChange;
pub use section_statistic::SectionStatistic;
pub use weight::{CategoryWeight, SectionWeights};
