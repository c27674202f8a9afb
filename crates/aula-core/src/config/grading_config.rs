use serde::{Deserialize, Serialize};

use crate::models::{EvaluationCategory, Percent};

use super::defaults;

/// Grading subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    /// Default category weights in percent, applied when a section has no
    /// configured row for a category. The shipped defaults sum to 80, not
    /// 100, a historical quirk preserved on purpose (see `constants`).
    pub default_weight_formative: f64,
    pub default_weight_summative: f64,
    pub default_weight_final_exam: f64,
    /// Passing grade on the 0–20 scale.
    pub pass_threshold: f64,
    /// Maximum assumed for activities that declare none.
    pub default_activity_max: f64,
}

impl GradingConfig {
    /// Default weight for one category, as a clamped percent.
    pub fn default_weight(&self, category: EvaluationCategory) -> Percent {
        let raw = match category {
            EvaluationCategory::Formative => self.default_weight_formative,
            EvaluationCategory::Summative => self.default_weight_summative,
            EvaluationCategory::FinalExam => self.default_weight_final_exam,
        };
        Percent::new(raw)
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            default_weight_formative: defaults::DEFAULT_WEIGHT_FORMATIVE,
            default_weight_summative: defaults::DEFAULT_WEIGHT_SUMMATIVE,
            default_weight_final_exam: defaults::DEFAULT_WEIGHT_FINAL_EXAM,
            pass_threshold: defaults::PASS_THRESHOLD,
            default_activity_max: defaults::DEFAULT_ACTIVITY_MAX,
        }
    }
}
