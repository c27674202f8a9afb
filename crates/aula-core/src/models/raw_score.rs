use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::EvaluationCategory;
use super::percent::Percent;

/// One recorded score for one activity of one enrollment.
///
/// Owned by the score ledger; the aggregation engine only reads these.
/// Only the latest value per (enrollment, activity) exists here; superseded
/// values live in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScore {
    pub id: String,
    pub enrollment_id: String,
    pub section_id: String,
    pub activity_id: String,
    pub category: EvaluationCategory,
    /// Points obtained by the student.
    pub obtained: f64,
    /// Maximum obtainable points. None means the activity never declared one
    /// and the configured default applies.
    pub max_possible: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl RawScore {
    /// The score as a percentage of its maximum, falling back to
    /// `default_max` when the activity declares none.
    pub fn percent(&self, default_max: f64) -> Percent {
        Percent::from_ratio(self.obtained, self.max_possible.unwrap_or(default_max))
    }
}
