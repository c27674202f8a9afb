use serde::{Deserialize, Serialize};

use crate::config::GradingConfig;

use super::category::EvaluationCategory;
use super::percent::Percent;

/// One configured weight row: how much a category counts toward the final
/// grade of a section, in percent. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub section_id: String,
    pub category: EvaluationCategory,
    pub weight_percent: Percent,
}

/// Resolved weights for one section, with defaults filled in for categories
/// the section never configured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionWeights {
    pub formative: Percent,
    pub summative: Percent,
    pub final_exam: Percent,
}

impl SectionWeights {
    /// The documented defaults (10 / 30 / 40; they sum to 80, see
    /// `constants`).
    pub fn defaults(config: &GradingConfig) -> Self {
        Self {
            formative: config.default_weight(EvaluationCategory::Formative),
            summative: config.default_weight(EvaluationCategory::Summative),
            final_exam: config.default_weight(EvaluationCategory::FinalExam),
        }
    }

    /// Overlay configured rows on top of the defaults.
    pub fn resolve(rows: &[CategoryWeight], config: &GradingConfig) -> Self {
        let mut weights = Self::defaults(config);
        for row in rows {
            weights.set(row.category, row.weight_percent);
        }
        weights
    }

    pub fn get(&self, category: EvaluationCategory) -> Percent {
        match category {
            EvaluationCategory::Formative => self.formative,
            EvaluationCategory::Summative => self.summative,
            EvaluationCategory::FinalExam => self.final_exam,
        }
    }

    pub fn set(&mut self, category: EvaluationCategory, weight: Percent) {
        match category {
            EvaluationCategory::Formative => self.formative = weight,
            EvaluationCategory::Summative => self.summative = weight,
            EvaluationCategory::FinalExam => self.final_exam = weight,
        }
    }
}
