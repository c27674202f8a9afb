use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Insert shape for one audit log entry. The store assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub raw_score_id: String,
    pub enrollment_id: String,
    pub activity_id: String,
    /// Obtained value before the write; None for a first-time score.
    pub previous_value: Option<f64>,
    pub new_value: f64,
    pub reason: Option<String>,
    pub actor_id: Option<String>,
}

/// One row of the append-only score audit log.
///
/// Never updated or deleted after insert. Purely diagnostic: no derived
/// grade depends on it, and a failed append never fails a score write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub raw_score_id: String,
    pub enrollment_id: String,
    pub activity_id: String,
    pub previous_value: Option<f64>,
    pub new_value: f64,
    pub reason: Option<String>,
    pub actor_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}
