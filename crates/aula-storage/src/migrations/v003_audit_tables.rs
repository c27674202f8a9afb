//! v003: score_audit_log (append-only; no UPDATE or DELETE is ever issued).

use rusqlite::Connection;

use aula_core::errors::AulaResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AulaResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS score_audit_log (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            raw_score_id   TEXT NOT NULL,
            enrollment_id  TEXT NOT NULL,
            activity_id    TEXT NOT NULL,
            previous_value REAL,
            new_value      REAL NOT NULL,
            reason         TEXT,
            actor_id       TEXT,
            timestamp      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_audit_score ON score_audit_log(raw_score_id);
        CREATE INDEX IF NOT EXISTS idx_audit_enrollment ON score_audit_log(enrollment_id);
        CREATE INDEX IF NOT EXISTS idx_audit_timestamp ON score_audit_log(timestamp);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
