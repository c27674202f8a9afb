use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::EvaluationCategory;
use super::category_average::CategoryAverage;
use super::percent::{GradePoints, Percent};

/// Average and activity count for one category, as folded into a final grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub average: Percent,
    pub activity_count: u32,
}

/// Per-category slice of a final grade, one summary per recognized category.
/// Categories the enrollment has no averages for default to 0/0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub formative: CategorySummary,
    pub summative: CategorySummary,
    pub final_exam: CategorySummary,
}

impl CategoryBreakdown {
    /// Build from whatever category average rows exist; missing categories
    /// stay at the 0/0 default.
    pub fn from_averages(averages: &[CategoryAverage]) -> Self {
        let mut breakdown = Self::default();
        for avg in averages {
            breakdown.set(
                avg.category,
                CategorySummary {
                    average: avg.average,
                    activity_count: avg.activity_count,
                },
            );
        }
        breakdown
    }

    pub fn get(&self, category: EvaluationCategory) -> CategorySummary {
        match category {
            EvaluationCategory::Formative => self.formative,
            EvaluationCategory::Summative => self.summative,
            EvaluationCategory::FinalExam => self.final_exam,
        }
    }

    pub fn set(&mut self, category: EvaluationCategory, summary: CategorySummary) {
        match category {
            EvaluationCategory::Formative => self.formative = summary,
            EvaluationCategory::Summative => self.summative = summary,
            EvaluationCategory::FinalExam => self.final_exam = summary,
        }
    }

    /// Total scored activities across all categories.
    pub fn total_activities(&self) -> u32 {
        EvaluationCategory::ALL
            .iter()
            .map(|c| self.get(*c).activity_count)
            .sum()
    }
}

/// The weighted final grade for one (enrollment, section).
///
/// A pure function of the current category averages and the section's weight
/// configuration; exactly one row exists per key and it is only ever written
/// by the final grade calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalGrade {
    pub enrollment_id: String,
    pub section_id: String,
    pub breakdown: CategoryBreakdown,
    pub weighted_percent: Percent,
    pub score_on_20: GradePoints,
    pub total_activities: u32,
    pub computed_at: DateTime<Utc>,
}

impl FinalGrade {
    /// Whether the grade meets the passing threshold (11 of 20).
    pub fn is_passing(&self) -> bool {
        self.score_on_20.is_passing()
    }
}
