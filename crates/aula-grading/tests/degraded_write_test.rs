//! Integration test: pipeline behavior when storage fails mid-write.
//!
//! The ledger write is the primary mutation. Everything after it degrades
//! instead of failing the request: an audit append error is logged and
//! swallowed, a recompute error turns the outcome into `RecordedOnly`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use aula_core::config::GradingConfig;
use aula_core::errors::{AulaError, AulaResult, StorageError};
use aula_core::models::{
    AuditEntry, AuditRecord, CategoryAverage, CategoryWeight, EvaluationCategory, FinalGrade,
    RawScore, ScoreChange, SectionStatistic,
};
use aula_core::traits::{IGradeStorage, IScoreLedger, ScoreUpsert};
use aula_grading::{GradingPipeline, ScoreWriteOutcome};
use aula_storage::StorageEngine;

/// Real SQLite engine behind toggleable failure points.
struct FlakyStore {
    engine: Arc<StorageEngine>,
    fail_score_reads: AtomicBool,
    fail_audit: AtomicBool,
}

impl FlakyStore {
    fn new(engine: Arc<StorageEngine>) -> Self {
        Self {
            engine,
            fail_score_reads: AtomicBool::new(false),
            fail_audit: AtomicBool::new(false),
        }
    }

    fn injected_failure() -> AulaError {
        AulaError::Storage(StorageError::SqliteError {
            message: "disk I/O error".to_string(),
        })
    }
}

impl IScoreLedger for FlakyStore {
    fn upsert_score(&self, score: &RawScore) -> AulaResult<ScoreUpsert> {
        self.engine.upsert_score(score)
    }

    fn scores_for_category(
        &self,
        enrollment_id: &str,
        section_id: &str,
        category: EvaluationCategory,
    ) -> AulaResult<Vec<RawScore>> {
        if self.fail_score_reads.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }
        self.engine
            .scores_for_category(enrollment_id, section_id, category)
    }
}

impl IGradeStorage for FlakyStore {
    fn upsert_category_average(&self, average: &CategoryAverage) -> AulaResult<()> {
        self.engine.upsert_category_average(average)
    }

    fn category_averages(
        &self,
        enrollment_id: &str,
        section_id: &str,
    ) -> AulaResult<Vec<CategoryAverage>> {
        self.engine.category_averages(enrollment_id, section_id)
    }

    fn upsert_final_grade(&self, grade: &FinalGrade) -> AulaResult<()> {
        self.engine.upsert_final_grade(grade)
    }

    fn final_grade(
        &self,
        enrollment_id: &str,
        section_id: &str,
    ) -> AulaResult<Option<FinalGrade>> {
        self.engine.final_grade(enrollment_id, section_id)
    }

    fn final_grades_for_section(&self, section_id: &str) -> AulaResult<Vec<FinalGrade>> {
        self.engine.final_grades_for_section(section_id)
    }

    fn append_audit(&self, record: &AuditRecord) -> AulaResult<i64> {
        if self.fail_audit.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }
        self.engine.append_audit(record)
    }

    fn audit_history_for_enrollment(&self, enrollment_id: &str) -> AulaResult<Vec<AuditEntry>> {
        self.engine.audit_history_for_enrollment(enrollment_id)
    }

    fn audit_history_for_score(&self, raw_score_id: &str) -> AulaResult<Vec<AuditEntry>> {
        self.engine.audit_history_for_score(raw_score_id)
    }

    fn section_weights(&self, section_id: &str) -> AulaResult<Vec<CategoryWeight>> {
        self.engine.section_weights(section_id)
    }

    fn set_section_weight(&self, weight: &CategoryWeight) -> AulaResult<()> {
        self.engine.set_section_weight(weight)
    }

    fn replace_section_statistics(
        &self,
        section_id: &str,
        statistics: &[SectionStatistic],
    ) -> AulaResult<()> {
        self.engine.replace_section_statistics(section_id, statistics)
    }

    fn section_statistics(
        &self,
        section_id: &str,
        category: Option<EvaluationCategory>,
    ) -> AulaResult<Vec<SectionStatistic>> {
        self.engine.section_statistics(section_id, category)
    }
}

fn flaky_pipeline() -> (Arc<StorageEngine>, Arc<FlakyStore>, GradingPipeline) {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    let store = Arc::new(FlakyStore::new(engine.clone()));
    let ledger: Arc<dyn IScoreLedger> = store.clone();
    let storage: Arc<dyn IGradeStorage> = store.clone();
    let pipeline = GradingPipeline::new(ledger, storage, GradingConfig::default());
    (engine, store, pipeline)
}

fn change(obtained: f64) -> ScoreChange {
    ScoreChange {
        enrollment_id: "enr-1".to_string(),
        section_id: "sec-1".to_string(),
        activity_id: "act-1".to_string(),
        category: EvaluationCategory::Formative,
        obtained,
        max_possible: Some(20.0),
        reason: None,
        actor_id: None,
    }
}

#[test]
fn recompute_failure_degrades_to_recorded_only_and_retry_heals() {
    let (engine, store, pipeline) = flaky_pipeline();
    store.fail_score_reads.store(true, Ordering::SeqCst);

    let outcome = pipeline.record_score_change(&change(15.0)).unwrap();
    match &outcome {
        ScoreWriteOutcome::RecordedOnly { recompute_error } => {
            assert!(matches!(recompute_error, AulaError::Storage(_)));
        }
        ScoreWriteOutcome::Recomputed(_) => panic!("recompute should have failed"),
    }
    assert!(outcome.final_grade().is_none());

    // The primary write and its audit entry survived the failed recompute.
    let scores = engine
        .scores_for_category("enr-1", "sec-1", EvaluationCategory::Formative)
        .unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].obtained, 15.0);
    assert_eq!(pipeline.audit_history("enr-1").unwrap().len(), 1);

    // Derived rows are stale until the caller retries.
    assert!(pipeline.final_grade("enr-1", "sec-1").unwrap().is_none());

    store.fail_score_reads.store(false, Ordering::SeqCst);
    let grade = pipeline.recompute_grades("enr-1", "sec-1").unwrap();
    assert_eq!(grade.breakdown.formative.average.value(), 75.0);
    assert_eq!(grade.breakdown.formative.activity_count, 1);
    assert!(pipeline.final_grade("enr-1", "sec-1").unwrap().is_some());
}

#[test]
fn audit_failure_never_blocks_the_score_write() {
    let (engine, store, pipeline) = flaky_pipeline();
    store.fail_audit.store(true, Ordering::SeqCst);

    let outcome = pipeline.record_score_change(&change(12.0)).unwrap();

    // Write and recompute both completed; only the audit entry is missing.
    let grade = outcome.final_grade().expect("recompute should complete");
    assert_eq!(grade.breakdown.formative.average.value(), 60.0);
    let scores = engine
        .scores_for_category("enr-1", "sec-1", EvaluationCategory::Formative)
        .unwrap();
    assert_eq!(scores.len(), 1);
    assert!(pipeline.audit_history("enr-1").unwrap().is_empty());

    // Later writes audit normally again.
    store.fail_audit.store(false, Ordering::SeqCst);
    pipeline.record_score_change(&change(14.0)).unwrap();
    let history = pipeline.audit_history("enr-1").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_value, Some(12.0));
    assert_eq!(history[0].new_value, 14.0);
}
