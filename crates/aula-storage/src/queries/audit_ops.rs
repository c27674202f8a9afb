//! Append-only score audit log. INSERT and SELECT only; this module
//! deliberately has no update or delete statement.

use rusqlite::{params, Connection};

use aula_core::errors::AulaResult;
use aula_core::models::{AuditEntry, AuditRecord};

use crate::to_storage_err;

use super::parse_dt;

/// Append one entry; returns the assigned row id.
pub fn append(conn: &Connection, record: &AuditRecord) -> AulaResult<i64> {
    conn.execute(
        "INSERT INTO score_audit_log (
            raw_score_id, enrollment_id, activity_id,
            previous_value, new_value, reason, actor_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.raw_score_id,
            record.enrollment_id,
            record.activity_id,
            record.previous_value,
            record.new_value,
            record.reason,
            record.actor_id,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Full change history for one enrollment, oldest first.
pub fn history_for_enrollment(
    conn: &Connection,
    enrollment_id: &str,
) -> AulaResult<Vec<AuditEntry>> {
    query_history(
        conn,
        "WHERE enrollment_id = ?1",
        params![enrollment_id],
    )
}

/// Full change history for one raw score, oldest first.
pub fn history_for_score(conn: &Connection, raw_score_id: &str) -> AulaResult<Vec<AuditEntry>> {
    query_history(conn, "WHERE raw_score_id = ?1", params![raw_score_id])
}

fn query_history(
    conn: &Connection,
    filter: &str,
    filter_params: &[&dyn rusqlite::ToSql],
) -> AulaResult<Vec<AuditEntry>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT id, raw_score_id, enrollment_id, activity_id,
                    previous_value, new_value, reason, actor_id, timestamp
             FROM score_audit_log {filter} ORDER BY id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    struct RawEntry {
        id: i64,
        raw_score_id: String,
        enrollment_id: String,
        activity_id: String,
        previous_value: Option<f64>,
        new_value: f64,
        reason: Option<String>,
        actor_id: Option<String>,
        timestamp: String,
    }

    let rows = stmt
        .query_map(filter_params, |row| {
            Ok(RawEntry {
                id: row.get(0)?,
                raw_score_id: row.get(1)?,
                enrollment_id: row.get(2)?,
                activity_id: row.get(3)?,
                previous_value: row.get(4)?,
                new_value: row.get(5)?,
                reason: row.get(6)?,
                actor_id: row.get(7)?,
                timestamp: row.get(8)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter()
        .map(|raw| {
            Ok(AuditEntry {
                id: raw.id,
                raw_score_id: raw.raw_score_id,
                enrollment_id: raw.enrollment_id,
                activity_id: raw.activity_id,
                previous_value: raw.previous_value,
                new_value: raw.new_value,
                reason: raw.reason,
                actor_id: raw.actor_id,
                timestamp: parse_dt(&raw.timestamp)?,
            })
        })
        .collect()
}
