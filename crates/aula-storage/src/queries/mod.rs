//! One query module per logical table.

pub mod audit_ops;
pub mod average_ops;
pub mod grade_ops;
pub mod maintenance;
pub mod score_ops;
pub mod stats_ops;
pub mod weight_ops;

use chrono::{DateTime, Utc};

use aula_core::errors::AulaResult;
use aula_core::models::EvaluationCategory;

use crate::to_storage_err;

/// Parse an RFC3339 TEXT column.
pub(crate) fn parse_dt(s: &str) -> AulaResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}

/// Parse a category TEXT column.
pub(crate) fn parse_category(s: &str) -> AulaResult<EvaluationCategory> {
    EvaluationCategory::parse(s).ok_or_else(|| to_storage_err(format!("unknown category '{s}'")))
}
