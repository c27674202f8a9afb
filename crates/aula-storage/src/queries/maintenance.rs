//! VACUUM, checkpoint, integrity check.

use rusqlite::Connection;

use aula_core::errors::AulaResult;

use crate::to_storage_err;

/// Run full vacuum.
pub fn full_vacuum(conn: &Connection) -> AulaResult<()> {
    conn.execute_batch("VACUUM")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// WAL checkpoint.
pub fn wal_checkpoint(conn: &Connection) -> AulaResult<()> {
    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Run integrity check. Returns true if database is OK.
pub fn integrity_check(conn: &Connection) -> AulaResult<bool> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(result == "ok")
}
