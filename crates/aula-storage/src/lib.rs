//! # aula-storage
//!
//! SQLite persistence for the grading engine: the raw score ledger, the
//! derived category-average and final-grade tables, the append-only audit
//! log, weight configuration, and the section statistics cache.
//!
//! One write connection, a small WAL read pool, versioned migrations.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod recovery;

pub use engine::StorageEngine;

use aula_core::errors::{AulaError, StorageError};

/// Wrap an SQLite-level failure message into the crate error type.
pub(crate) fn to_storage_err(message: String) -> AulaError {
    AulaError::Storage(StorageError::SqliteError { message })
}
