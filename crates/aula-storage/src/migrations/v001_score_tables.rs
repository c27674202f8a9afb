//! v001: raw_scores (the score ledger), category_weights.

use rusqlite::Connection;

use aula_core::errors::AulaResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AulaResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS raw_scores (
            id            TEXT PRIMARY KEY,
            enrollment_id TEXT NOT NULL,
            section_id    TEXT NOT NULL,
            activity_id   TEXT NOT NULL,
            category      TEXT NOT NULL,
            obtained      REAL NOT NULL,
            max_possible  REAL,
            recorded_at   TEXT NOT NULL,
            UNIQUE(enrollment_id, activity_id)
        );

        CREATE INDEX IF NOT EXISTS idx_scores_enrollment_section
            ON raw_scores(enrollment_id, section_id, category);
        CREATE INDEX IF NOT EXISTS idx_scores_activity ON raw_scores(activity_id);

        CREATE TABLE IF NOT EXISTS category_weights (
            section_id     TEXT NOT NULL,
            category       TEXT NOT NULL,
            weight_percent REAL NOT NULL,
            PRIMARY KEY (section_id, category)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
