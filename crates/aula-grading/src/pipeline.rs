//! The score-write pipeline: ledger upsert, audit append, then the derived
//! recompute, serialized per (enrollment, section).

use std::sync::{Arc, Mutex};

use chrono::Utc;
use dashmap::DashMap;

use aula_core::config::GradingConfig;
use aula_core::errors::{AulaError, AulaResult};
use aula_core::models::{AuditEntry, AuditRecord, FinalGrade, RawScore, ScoreChange};
use aula_core::traits::{IGradeStorage, IScoreLedger};

use crate::aggregator::CategoryAggregator;
use crate::calculator::FinalGradeCalculator;

/// What happened to a score write.
///
/// The primary ledger mutation always succeeded when one of these is
/// returned; the variants distinguish whether the derived recompute also
/// completed. `RecordedOnly` is the explicit form of the platform's old
/// swallow-and-log policy: the caller can log or retry deliberately.
#[derive(Debug)]
pub enum ScoreWriteOutcome {
    /// Ledger write, aggregation and final grade all completed.
    Recomputed(FinalGrade),
    /// Ledger write committed but the derived recompute failed. Category
    /// averages and the final grade are stale until the next recompute.
    RecordedOnly { recompute_error: AulaError },
}

impl ScoreWriteOutcome {
    /// The refreshed final grade, if the recompute completed.
    pub fn final_grade(&self) -> Option<&FinalGrade> {
        match self {
            ScoreWriteOutcome::Recomputed(grade) => Some(grade),
            ScoreWriteOutcome::RecordedOnly { .. } => None,
        }
    }
}

/// Entry point for everything the surrounding platform asks of the engine
/// on the write path.
pub struct GradingPipeline {
    ledger: Arc<dyn IScoreLedger>,
    storage: Arc<dyn IGradeStorage>,
    aggregator: CategoryAggregator,
    calculator: FinalGradeCalculator,
    config: GradingConfig,
    /// One lock per (enrollment, section): two writes racing through the
    /// read-then-upsert recompute would otherwise lose an update.
    locks: DashMap<(String, String), Arc<Mutex<()>>>,
}

impl GradingPipeline {
    pub fn new(
        ledger: Arc<dyn IScoreLedger>,
        storage: Arc<dyn IGradeStorage>,
        config: GradingConfig,
    ) -> Self {
        let aggregator =
            CategoryAggregator::new(Arc::clone(&ledger), Arc::clone(&storage), config.clone());
        let calculator = FinalGradeCalculator::new(Arc::clone(&storage), config.clone());
        Self {
            ledger,
            storage,
            aggregator,
            calculator,
            config,
            locks: DashMap::new(),
        }
    }

    /// Record one score change and recompute the derived rows.
    ///
    /// Validation failures reject the request before anything is mutated.
    /// A ledger write failure is a hard error. After the ledger write
    /// commits, an audit failure is logged and swallowed, and a recompute
    /// failure turns into `RecordedOnly` rather than an error. The write
    /// itself is never rolled back.
    pub fn record_score_change(&self, change: &ScoreChange) -> AulaResult<ScoreWriteOutcome> {
        change.validate(&self.config)?;

        let lock = self.lock_for(&change.enrollment_id, &change.section_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let score = RawScore {
            id: uuid::Uuid::new_v4().to_string(),
            enrollment_id: change.enrollment_id.clone(),
            section_id: change.section_id.clone(),
            activity_id: change.activity_id.clone(),
            category: change.category,
            obtained: change.obtained,
            max_possible: change.max_possible,
            recorded_at: Utc::now(),
        };
        let upsert = self.ledger.upsert_score(&score)?;

        // Audit is diagnostic, not transactional: never fail the write.
        let record = AuditRecord {
            raw_score_id: upsert.raw_score_id.clone(),
            enrollment_id: change.enrollment_id.clone(),
            activity_id: change.activity_id.clone(),
            previous_value: upsert.previous_value,
            new_value: change.obtained,
            reason: change.reason.clone(),
            actor_id: change.actor_id.clone(),
        };
        if let Err(e) = self.storage.append_audit(&record) {
            tracing::warn!(
                enrollment_id = %change.enrollment_id,
                activity_id = %change.activity_id,
                error = %e,
                "audit append failed, score write continues"
            );
        }

        match self.recompute(&change.enrollment_id, &change.section_id) {
            Ok(grade) => Ok(ScoreWriteOutcome::Recomputed(grade)),
            Err(e) => {
                tracing::warn!(
                    enrollment_id = %change.enrollment_id,
                    section_id = %change.section_id,
                    error = %e,
                    "derived recompute failed after committed score write"
                );
                Ok(ScoreWriteOutcome::RecordedOnly { recompute_error: e })
            }
        }
    }

    /// Re-run aggregation and final grade composition for one enrollment.
    /// The recompute is idempotent, so a caller that received `RecordedOnly`
    /// can retry with this at any time.
    pub fn recompute_grades(&self, enrollment_id: &str, section_id: &str) -> AulaResult<FinalGrade> {
        let lock = self.lock_for(enrollment_id, section_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.recompute(enrollment_id, section_id)
    }

    /// Read path: the stored final grade, or None if never computed.
    pub fn final_grade(
        &self,
        enrollment_id: &str,
        section_id: &str,
    ) -> AulaResult<Option<FinalGrade>> {
        self.storage.final_grade(enrollment_id, section_id)
    }

    /// Read path: the full audit history for an enrollment, oldest first.
    pub fn audit_history(&self, enrollment_id: &str) -> AulaResult<Vec<AuditEntry>> {
        self.storage.audit_history_for_enrollment(enrollment_id)
    }

    fn recompute(&self, enrollment_id: &str, section_id: &str) -> AulaResult<FinalGrade> {
        self.aggregator.recalculate(enrollment_id, section_id)?;
        self.calculator.recalculate(enrollment_id, section_id)
    }

    /// The lock for one (enrollment, section). The mutex holds no data, so
    /// a poisoned lock (a panicked writer) is recovered, not propagated.
    fn lock_for(&self, enrollment_id: &str, section_id: &str) -> Arc<Mutex<()>> {
        let key = (enrollment_id.to_string(), section_id.to_string());
        self.locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
