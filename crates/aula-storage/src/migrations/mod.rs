//! Versioned schema migrations, tracked via `PRAGMA user_version`.

mod v001_score_tables;
mod v002_grade_tables;
mod v003_audit_tables;
mod v004_stats_tables;

use rusqlite::Connection;

use aula_core::errors::{AulaError, AulaResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> AulaResult<()>;

const MIGRATIONS: &[(u32, MigrationFn)] = &[
    (1, v001_score_tables::migrate),
    (2, v002_grade_tables::migrate),
    (3, v003_audit_tables::migrate),
    (4, v004_stats_tables::migrate),
];

/// Apply all migrations newer than the database's current version.
pub fn run_migrations(conn: &Connection) -> AulaResult<()> {
    let current = schema_version(conn)?;
    for (version, migrate) in MIGRATIONS {
        if *version > current {
            migrate(conn).map_err(|e| {
                AulaError::Storage(StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })
            })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| to_storage_err(e.to_string()))?;
            tracing::debug!(version, "applied schema migration");
        }
    }
    Ok(())
}

/// Current schema version of the database.
pub fn schema_version(conn: &Connection) -> AulaResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
