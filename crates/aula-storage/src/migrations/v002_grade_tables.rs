//! v002: category_averages, final_grades (derived, upsert-only).

use rusqlite::Connection;

use aula_core::errors::AulaResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AulaResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS category_averages (
            enrollment_id   TEXT NOT NULL,
            section_id      TEXT NOT NULL,
            category        TEXT NOT NULL,
            average_percent REAL NOT NULL,
            activity_count  INTEGER NOT NULL DEFAULT 0,
            computed_at     TEXT NOT NULL,
            PRIMARY KEY (enrollment_id, section_id, category)
        );

        CREATE INDEX IF NOT EXISTS idx_averages_section
            ON category_averages(section_id, category);

        CREATE TABLE IF NOT EXISTS final_grades (
            enrollment_id      TEXT NOT NULL,
            section_id         TEXT NOT NULL,
            formative_percent  REAL NOT NULL,
            formative_count    INTEGER NOT NULL DEFAULT 0,
            summative_percent  REAL NOT NULL,
            summative_count    INTEGER NOT NULL DEFAULT 0,
            final_exam_percent REAL NOT NULL,
            final_exam_count   INTEGER NOT NULL DEFAULT 0,
            weighted_percent   REAL NOT NULL,
            score_on_20        REAL NOT NULL,
            total_activities   INTEGER NOT NULL DEFAULT 0,
            computed_at        TEXT NOT NULL,
            PRIMARY KEY (enrollment_id, section_id)
        );

        CREATE INDEX IF NOT EXISTS idx_final_grades_section
            ON final_grades(section_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
