use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::EvaluationCategory;
use super::percent::Percent;

/// Cached cohort statistics for one (section, category).
///
/// Fully replaced on every refresh: this is a cache over final grades, not
/// an incrementally maintained aggregate. Staleness between a grade change
/// and the next refresh is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionStatistic {
    pub section_id: String,
    pub category: EvaluationCategory,
    /// Enrollments with a final grade row in the section.
    pub student_count: u32,
    /// Total scored activities in this category across those enrollments.
    pub evaluation_count: u32,
    /// Mean / min / max of the category grade on the 0–20 scale.
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub pass_count: u32,
    pub fail_count: u32,
    pub pass_rate_percent: Percent,
    pub refreshed_at: DateTime<Utc>,
}
