//! Cached cohort statistics per (section, category).

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use aula_core::config::GradingConfig;
use aula_core::errors::AulaResult;
use aula_core::models::{
    EvaluationCategory, FinalGrade, Percent, SectionStatistic,
};
use aula_core::traits::IGradeStorage;

/// Full-recompute statistics cache over the final grade table.
///
/// Each refresh discards and replaces every cached row for the section.
/// Correctness depends on the caller refreshing after final grade changes;
/// staleness in between is the documented trade-off of a cache. Refreshes
/// for the same section are serialized only to avoid duplicate work; the
/// operation itself is idempotent.
pub struct SectionStatsCache {
    storage: Arc<dyn IGradeStorage>,
    config: GradingConfig,
    refresh_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SectionStatsCache {
    pub fn new(storage: Arc<dyn IGradeStorage>, config: GradingConfig) -> Self {
        Self {
            storage,
            config,
            refresh_locks: DashMap::new(),
        }
    }

    /// Recompute all per-category rows for a section from its final grades
    /// and replace the cache. Failures propagate to the caller; grading
    /// correctness never depends on this path.
    pub fn refresh(&self, section_id: &str) -> AulaResult<Vec<SectionStatistic>> {
        let lock = self
            .refresh_locks
            .entry(section_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let grades = self.storage.final_grades_for_section(section_id)?;
        let statistics = compute(section_id, &grades, self.config.pass_threshold, Utc::now());
        self.storage
            .replace_section_statistics(section_id, &statistics)?;
        Ok(statistics)
    }

    /// Read the cached rows, optionally refreshing first.
    pub fn statistics(
        &self,
        section_id: &str,
        category: Option<EvaluationCategory>,
        refresh_first: bool,
    ) -> AulaResult<Vec<SectionStatistic>> {
        if refresh_first {
            self.refresh(section_id)?;
        }
        self.storage.section_statistics(section_id, category)
    }
}

/// Compute cohort statistics from a section's final grades, one row per
/// category. Kept free of I/O for direct testing.
///
/// Each enrollment contributes its category average projected onto the 0–20
/// scale; enrollments without activities in a category count as 0, in line
/// with the zero-default for missing averages.
pub fn compute(
    section_id: &str,
    grades: &[FinalGrade],
    pass_threshold: f64,
    refreshed_at: DateTime<Utc>,
) -> Vec<SectionStatistic> {
    EvaluationCategory::ALL
        .iter()
        .map(|category| {
            let values: Vec<f64> = grades
                .iter()
                .map(|g| g.breakdown.get(*category).average.on_scale_of_20().value())
                .collect();
            let evaluation_count: u32 = grades
                .iter()
                .map(|g| g.breakdown.get(*category).activity_count)
                .sum();

            let student_count = values.len() as u32;
            let pass_count = values.iter().filter(|v| **v >= pass_threshold).count() as u32;
            let fail_count = student_count - pass_count;
            let mean = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            SectionStatistic {
                section_id: section_id.to_string(),
                category: *category,
                student_count,
                evaluation_count,
                mean,
                min: if values.is_empty() { 0.0 } else { min },
                max: if values.is_empty() { 0.0 } else { max },
                pass_count,
                fail_count,
                pass_rate_percent: if student_count == 0 {
                    Percent::ZERO
                } else {
                    Percent::new(pass_count as f64 / student_count as f64 * 100.0)
                },
                refreshed_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_core::models::{CategoryBreakdown, CategorySummary, GradePoints};

    fn grade_with_summative(enrollment: &str, percent: f64) -> FinalGrade {
        let mut breakdown = CategoryBreakdown::default();
        breakdown.set(
            EvaluationCategory::Summative,
            CategorySummary {
                average: Percent::new(percent),
                activity_count: 1,
            },
        );
        FinalGrade {
            enrollment_id: enrollment.to_string(),
            section_id: "sec-1".to_string(),
            breakdown,
            weighted_percent: Percent::new(percent),
            score_on_20: Percent::new(percent).on_scale_of_20(),
            total_activities: 1,
            computed_at: Utc::now(),
        }
    }

    #[test]
    fn computes_pass_fail_against_threshold() {
        // Category grades 8, 12, 16 on the 0-20 scale (40%, 60%, 80%).
        let grades = vec![
            grade_with_summative("enr-1", 40.0),
            grade_with_summative("enr-2", 60.0),
            grade_with_summative("enr-3", 80.0),
        ];
        let stats = compute("sec-1", &grades, 11.0, Utc::now());
        let summative = stats
            .iter()
            .find(|s| s.category == EvaluationCategory::Summative)
            .unwrap();

        assert_eq!(summative.student_count, 3);
        assert_eq!(summative.evaluation_count, 3);
        assert_eq!(summative.pass_count, 2);
        assert_eq!(summative.fail_count, 1);
        assert_eq!(summative.mean, 12.0);
        assert_eq!(summative.min, 8.0);
        assert_eq!(summative.max, 16.0);
        assert!((summative.pass_rate_percent.value() - 66.666_666_666_666_66).abs() < 1e-9);
    }

    #[test]
    fn empty_section_yields_zeroed_rows() {
        let stats = compute("sec-1", &[], 11.0, Utc::now());
        assert_eq!(stats.len(), 3);
        for stat in stats {
            assert_eq!(stat.student_count, 0);
            assert_eq!(stat.mean, 0.0);
            assert_eq!(stat.pass_rate_percent.value(), 0.0);
        }
    }

    #[test]
    fn threshold_boundary_is_a_pass() {
        let grades = vec![grade_with_summative("enr-1", 55.0)]; // exactly 11/20
        let stats = compute("sec-1", &grades, 11.0, Utc::now());
        let summative = stats
            .iter()
            .find(|s| s.category == EvaluationCategory::Summative)
            .unwrap();
        assert_eq!(summative.pass_count, 1);
        assert!(GradePoints::new(11.0).is_passing());
    }
}
