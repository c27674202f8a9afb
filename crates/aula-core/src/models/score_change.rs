use serde::{Deserialize, Serialize};

use crate::config::GradingConfig;
use crate::errors::{AulaError, AulaResult};

use super::category::EvaluationCategory;

/// Engine-boundary input: one score write coming from the surrounding
/// platform (grade entry form, bulk import, correction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub enrollment_id: String,
    pub section_id: String,
    pub activity_id: String,
    pub category: EvaluationCategory,
    pub obtained: f64,
    pub max_possible: Option<f64>,
    /// Free-text justification for the change, kept in the audit log.
    #[serde(default)]
    pub reason: Option<String>,
    /// Who made the change, if known.
    #[serde(default)]
    pub actor_id: Option<String>,
}

impl ScoreChange {
    /// Reject malformed input before anything is mutated.
    pub fn validate(&self, config: &GradingConfig) -> AulaResult<()> {
        if self.enrollment_id.trim().is_empty() {
            return Err(AulaError::validation("enrollment_id", "must not be empty"));
        }
        if self.section_id.trim().is_empty() {
            return Err(AulaError::validation("section_id", "must not be empty"));
        }
        if self.activity_id.trim().is_empty() {
            return Err(AulaError::validation("activity_id", "must not be empty"));
        }
        if !self.obtained.is_finite() || self.obtained < 0.0 {
            return Err(AulaError::validation(
                "obtained",
                format!("must be a non-negative number, got {}", self.obtained),
            ));
        }
        let max = self.max_possible.unwrap_or(config.default_activity_max);
        if !max.is_finite() || max <= 0.0 {
            return Err(AulaError::validation(
                "max_possible",
                format!("must be a positive number, got {max}"),
            ));
        }
        if self.obtained > max {
            return Err(AulaError::validation(
                "obtained",
                format!("{} exceeds the activity maximum {max}", self.obtained),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(obtained: f64, max: Option<f64>) -> ScoreChange {
        ScoreChange {
            enrollment_id: "enr-1".to_string(),
            section_id: "sec-1".to_string(),
            activity_id: "act-1".to_string(),
            category: EvaluationCategory::Formative,
            obtained,
            max_possible: max,
            reason: None,
            actor_id: None,
        }
    }

    #[test]
    fn accepts_score_within_range() {
        assert!(change(15.0, Some(20.0)).validate(&GradingConfig::default()).is_ok());
    }

    #[test]
    fn rejects_score_above_max() {
        assert!(change(25.0, Some(20.0)).validate(&GradingConfig::default()).is_err());
    }

    #[test]
    fn rejects_negative_score() {
        assert!(change(-1.0, Some(20.0)).validate(&GradingConfig::default()).is_err());
    }

    #[test]
    fn rejects_non_positive_max() {
        assert!(change(0.0, Some(0.0)).validate(&GradingConfig::default()).is_err());
    }

    #[test]
    fn missing_max_falls_back_to_default() {
        // Default activity maximum is 20, so 18 with no declared max is fine.
        assert!(change(18.0, None).validate(&GradingConfig::default()).is_ok());
    }

    #[test]
    fn rejects_empty_ids() {
        let mut c = change(10.0, Some(20.0));
        c.enrollment_id = "  ".to_string();
        assert!(c.validate(&GradingConfig::default()).is_err());
    }
}
