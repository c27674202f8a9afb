use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::EvaluationCategory;
use super::percent::Percent;

/// Derived average for one (enrollment, section, category) tuple.
///
/// Exactly one row exists per key, written only by the category aggregator
/// via upsert, never inserted twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverage {
    pub enrollment_id: String,
    pub section_id: String,
    pub category: EvaluationCategory,
    pub average: Percent,
    pub activity_count: u32,
    pub computed_at: DateTime<Utc>,
}

impl CategoryAverage {
    /// The row written for a category with no scored activities yet:
    /// average 0, count 0. Readers treat a missing row the same way.
    pub fn empty(
        enrollment_id: impl Into<String>,
        section_id: impl Into<String>,
        category: EvaluationCategory,
    ) -> Self {
        Self {
            enrollment_id: enrollment_id.into(),
            section_id: section_id.into(),
            category,
            average: Percent::ZERO,
            activity_count: 0,
            computed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_row_carries_key_and_zeroes() {
        let row = CategoryAverage::empty("enr-1", "sec-1", EvaluationCategory::Summative);
        assert_eq!(row.enrollment_id, "enr-1");
        assert_eq!(row.section_id, "sec-1");
        assert_eq!(row.category, EvaluationCategory::Summative);
        assert_eq!(row.average.value(), 0.0);
        assert_eq!(row.activity_count, 0);
    }
}
