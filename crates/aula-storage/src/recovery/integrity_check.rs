//! PRAGMA integrity_check, detect corruption early.

use rusqlite::Connection;

use aula_core::errors::AulaResult;

use crate::queries::maintenance;

/// Run integrity check. Returns true if database is healthy.
pub fn check_integrity(conn: &Connection) -> AulaResult<bool> {
    maintenance::integrity_check(conn)
}
