//! Category averages recomputed from the raw score ledger.

use std::sync::Arc;

use chrono::Utc;

use aula_core::config::GradingConfig;
use aula_core::errors::AulaResult;
use aula_core::models::{CategoryAverage, EvaluationCategory, Percent, RawScore};
use aula_core::traits::{IGradeStorage, IScoreLedger};

/// Recomputes the average percentage and activity count for every category
/// of one (enrollment, section) and upserts the result rows.
pub struct CategoryAggregator {
    ledger: Arc<dyn IScoreLedger>,
    storage: Arc<dyn IGradeStorage>,
    config: GradingConfig,
}

impl CategoryAggregator {
    pub fn new(
        ledger: Arc<dyn IScoreLedger>,
        storage: Arc<dyn IGradeStorage>,
        config: GradingConfig,
    ) -> Self {
        Self {
            ledger,
            storage,
            config,
        }
    }

    /// Recompute and upsert one row per recognized category.
    ///
    /// A category with no scored activities still gets its row, with
    /// average 0 and count 0. Read failures propagate; this step never
    /// silently succeeds on partial data.
    pub fn recalculate(
        &self,
        enrollment_id: &str,
        section_id: &str,
    ) -> AulaResult<Vec<CategoryAverage>> {
        let mut averages = Vec::with_capacity(EvaluationCategory::ALL.len());
        for category in EvaluationCategory::ALL {
            let scores = self
                .ledger
                .scores_for_category(enrollment_id, section_id, category)?;
            let row = if scores.is_empty() {
                CategoryAverage::empty(enrollment_id, section_id, category)
            } else {
                let (average, count) = average_percent(&scores, self.config.default_activity_max);
                CategoryAverage {
                    enrollment_id: enrollment_id.to_string(),
                    section_id: section_id.to_string(),
                    category,
                    average,
                    activity_count: count,
                    computed_at: Utc::now(),
                }
            };
            self.storage.upsert_category_average(&row)?;
            averages.push(row);
        }
        Ok(averages)
    }
}

/// Mean of the per-score percentages. Empty input yields (0, 0), never NaN.
pub fn average_percent(scores: &[RawScore], default_max: f64) -> (Percent, u32) {
    if scores.is_empty() {
        return (Percent::ZERO, 0);
    }
    let sum: f64 = scores
        .iter()
        .map(|s| s.percent(default_max).value())
        .sum();
    (
        Percent::new(sum / scores.len() as f64),
        scores.len() as u32,
    )
}
