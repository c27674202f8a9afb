//! v004: section_statistics (cache, fully replaced on refresh).

use rusqlite::Connection;

use aula_core::errors::AulaResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AulaResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS section_statistics (
            section_id        TEXT NOT NULL,
            category          TEXT NOT NULL,
            student_count     INTEGER NOT NULL DEFAULT 0,
            evaluation_count  INTEGER NOT NULL DEFAULT 0,
            mean              REAL NOT NULL DEFAULT 0,
            min               REAL NOT NULL DEFAULT 0,
            max               REAL NOT NULL DEFAULT 0,
            pass_count        INTEGER NOT NULL DEFAULT 0,
            fail_count        INTEGER NOT NULL DEFAULT 0,
            pass_rate_percent REAL NOT NULL DEFAULT 0,
            refreshed_at      TEXT NOT NULL,
            PRIMARY KEY (section_id, category)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
