//! StorageEngine owns the ConnectionPool and implements IScoreLedger +
//! IGradeStorage, startup pragma configuration and migrations.

use std::path::Path;

use aula_core::errors::AulaResult;
use aula_core::models::{
    AuditEntry, AuditRecord, CategoryAverage, CategoryWeight, EvaluationCategory, FinalGrade,
    RawScore, SectionStatistic,
};
use aula_core::traits::{IGradeStorage, IScoreLedger, ScoreUpsert};

use crate::migrations;
use crate::pool::ConnectionPool;

/// The main storage engine. Owns the connection pool and provides the full
/// IScoreLedger + IGradeStorage interface.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> AulaResult<Self> {
        let pool = ConnectionPool::open(path, 4)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        if !engine.wal_mode_active()? {
            tracing::warn!(
                path = %path.display(),
                "journal_mode did not switch to WAL, concurrent reads will degrade"
            );
        }
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    /// Routes all reads through the writer since in-memory read pool
    /// connections are isolated databases that can't see writer's changes.
    pub fn open_in_memory() -> AulaResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations.
    fn initialize(&self) -> AulaResult<()> {
        self.pool
            .writer
            .with_conn_sync(migrations::run_migrations)
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Whether the write connection is actually in WAL journal mode.
    pub fn wal_mode_active(&self) -> AulaResult<bool> {
        self.pool
            .writer
            .with_conn_sync(crate::pool::pragmas::verify_wal_mode)
    }

    /// Verify database integrity.
    pub fn integrity_check(&self) -> AulaResult<bool> {
        self.pool
            .writer
            .with_conn_sync(crate::recovery::integrity_check::check_integrity)
    }

    /// Reclaim free pages.
    pub fn vacuum(&self) -> AulaResult<()> {
        self.pool
            .writer
            .with_conn_sync(crate::queries::maintenance::full_vacuum)
    }

    /// Execute a read-only query on the best available connection.
    /// File-backed: uses the read pool (no writer contention).
    /// In-memory: uses the writer (read pool is isolated).
    fn with_reader<F, T>(&self, f: F) -> AulaResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> AulaResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IScoreLedger for StorageEngine {
    fn upsert_score(&self, score: &RawScore) -> AulaResult<ScoreUpsert> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::score_ops::upsert_score(conn, score))
    }

    fn scores_for_category(
        &self,
        enrollment_id: &str,
        section_id: &str,
        category: EvaluationCategory,
    ) -> AulaResult<Vec<RawScore>> {
        self.with_reader(|conn| {
            crate::queries::score_ops::scores_for_category(conn, enrollment_id, section_id, category)
        })
    }
}

impl IGradeStorage for StorageEngine {
    fn upsert_category_average(&self, average: &CategoryAverage) -> AulaResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::average_ops::upsert_average(conn, average))
    }

    fn category_averages(
        &self,
        enrollment_id: &str,
        section_id: &str,
    ) -> AulaResult<Vec<CategoryAverage>> {
        self.with_reader(|conn| {
            crate::queries::average_ops::averages_for_enrollment(conn, enrollment_id, section_id)
        })
    }

    fn upsert_final_grade(&self, grade: &FinalGrade) -> AulaResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::grade_ops::upsert_final_grade(conn, grade))
    }

    fn final_grade(
        &self,
        enrollment_id: &str,
        section_id: &str,
    ) -> AulaResult<Option<FinalGrade>> {
        self.with_reader(|conn| {
            crate::queries::grade_ops::get_final_grade(conn, enrollment_id, section_id)
        })
    }

    fn final_grades_for_section(&self, section_id: &str) -> AulaResult<Vec<FinalGrade>> {
        self.with_reader(|conn| crate::queries::grade_ops::grades_for_section(conn, section_id))
    }

    fn append_audit(&self, record: &AuditRecord) -> AulaResult<i64> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::audit_ops::append(conn, record))
    }

    fn audit_history_for_enrollment(&self, enrollment_id: &str) -> AulaResult<Vec<AuditEntry>> {
        self.with_reader(|conn| {
            crate::queries::audit_ops::history_for_enrollment(conn, enrollment_id)
        })
    }

    fn audit_history_for_score(&self, raw_score_id: &str) -> AulaResult<Vec<AuditEntry>> {
        self.with_reader(|conn| crate::queries::audit_ops::history_for_score(conn, raw_score_id))
    }

    fn section_weights(&self, section_id: &str) -> AulaResult<Vec<CategoryWeight>> {
        self.with_reader(|conn| crate::queries::weight_ops::weights_for_section(conn, section_id))
    }

    fn set_section_weight(&self, weight: &CategoryWeight) -> AulaResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::weight_ops::set_weight(conn, weight))
    }

    fn replace_section_statistics(
        &self,
        section_id: &str,
        statistics: &[SectionStatistic],
    ) -> AulaResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::stats_ops::replace_for_section(conn, section_id, statistics)
        })
    }

    fn section_statistics(
        &self,
        section_id: &str,
        category: Option<EvaluationCategory>,
    ) -> AulaResult<Vec<SectionStatistic>> {
        self.with_reader(|conn| {
            crate::queries::stats_ops::stats_for_section(conn, section_id, category)
        })
    }
}
