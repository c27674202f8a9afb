//! Weighted final grade composition.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use aula_core::config::GradingConfig;
use aula_core::errors::AulaResult;
use aula_core::models::{
    CategoryBreakdown, EvaluationCategory, FinalGrade, Percent, SectionWeights,
};
use aula_core::traits::IGradeStorage;

/// Combines the current category averages with the section's weight
/// configuration into one weighted final grade row.
pub struct FinalGradeCalculator {
    storage: Arc<dyn IGradeStorage>,
    config: GradingConfig,
}

impl FinalGradeCalculator {
    pub fn new(storage: Arc<dyn IGradeStorage>, config: GradingConfig) -> Self {
        Self { storage, config }
    }

    /// Recompute and upsert the final grade for one (enrollment, section).
    ///
    /// Pure over its inputs: with unchanged category averages and weights,
    /// repeated calls produce the same weighted percent and 0–20 score.
    /// Missing category averages count as 0/0; missing weight rows fall
    /// back to the documented defaults.
    pub fn recalculate(&self, enrollment_id: &str, section_id: &str) -> AulaResult<FinalGrade> {
        let averages = self.storage.category_averages(enrollment_id, section_id)?;
        let breakdown = CategoryBreakdown::from_averages(&averages);
        let weight_rows = self.storage.section_weights(section_id)?;
        let weights = SectionWeights::resolve(&weight_rows, &self.config);

        let grade = compose(enrollment_id, section_id, &breakdown, &weights, Utc::now());
        self.storage.upsert_final_grade(&grade)?;
        Ok(grade)
    }
}

/// The weighted composition itself, kept free of I/O so the idempotence and
/// range properties can be tested directly.
///
/// weighted = Σ average_i * weight_i / 100; score_on_20 = weighted * 20 / 100.
pub fn compose(
    enrollment_id: &str,
    section_id: &str,
    breakdown: &CategoryBreakdown,
    weights: &SectionWeights,
    computed_at: DateTime<Utc>,
) -> FinalGrade {
    let weighted: f64 = EvaluationCategory::ALL
        .iter()
        .map(|c| breakdown.get(*c).average.value() * weights.get(*c).value() / 100.0)
        .sum();
    let weighted_percent = Percent::new(weighted);

    FinalGrade {
        enrollment_id: enrollment_id.to_string(),
        section_id: section_id.to_string(),
        breakdown: *breakdown,
        weighted_percent,
        score_on_20: weighted_percent.on_scale_of_20(),
        total_activities: breakdown.total_activities(),
        computed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_core::models::CategorySummary;

    fn breakdown(formative: f64, summative: f64, final_exam: f64) -> CategoryBreakdown {
        CategoryBreakdown {
            formative: CategorySummary {
                average: Percent::new(formative),
                activity_count: 2,
            },
            summative: CategorySummary {
                average: Percent::new(summative),
                activity_count: 1,
            },
            final_exam: CategorySummary {
                average: Percent::new(final_exam),
                activity_count: 1,
            },
        }
    }

    #[test]
    fn composes_with_default_weights() {
        // 85*10/100 + 75*30/100 + 85*40/100 = 8.5 + 22.5 + 34 = 65
        let weights = SectionWeights::defaults(&GradingConfig::default());
        let grade = compose("enr-1", "sec-1", &breakdown(85.0, 75.0, 85.0), &weights, Utc::now());
        assert_eq!(grade.weighted_percent.value(), 65.0);
        assert_eq!(grade.score_on_20.value(), 13.0);
        assert_eq!(grade.total_activities, 4);
    }

    #[test]
    fn compose_is_idempotent() {
        let weights = SectionWeights::defaults(&GradingConfig::default());
        let b = breakdown(42.0, 61.5, 77.25);
        let now = Utc::now();
        let first = compose("enr-1", "sec-1", &b, &weights, now);
        let second = compose("enr-1", "sec-1", &b, &weights, now);
        assert_eq!(first, second);
    }

    #[test]
    fn all_zero_averages_give_zero_grade() {
        let weights = SectionWeights::defaults(&GradingConfig::default());
        let grade = compose(
            "enr-1",
            "sec-1",
            &CategoryBreakdown::default(),
            &weights,
            Utc::now(),
        );
        assert_eq!(grade.weighted_percent.value(), 0.0);
        assert_eq!(grade.score_on_20.value(), 0.0);
        assert!(!grade.is_passing());
    }
}
