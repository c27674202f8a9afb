use crate::errors::AulaResult;
use crate::models::{
    AuditEntry, AuditRecord, CategoryAverage, CategoryWeight, EvaluationCategory, FinalGrade,
    RawScore, SectionStatistic,
};

/// Result of a raw-score upsert: the row's identity plus the value it
/// replaced (None on first write). The previous value feeds the audit entry.
#[derive(Debug, Clone)]
pub struct ScoreUpsert {
    pub raw_score_id: String,
    pub previous_value: Option<f64>,
}

/// The raw score ledger. External collaborator from the engine's point of
/// view: the engine writes through it on a score change and reads from it
/// when recomputing category averages.
pub trait IScoreLedger: Send + Sync {
    /// Insert or overwrite the score for (enrollment, activity).
    /// At most one live row exists per key.
    fn upsert_score(&self, score: &RawScore) -> AulaResult<ScoreUpsert>;

    /// All current scores for one category of one enrollment in one section.
    fn scores_for_category(
        &self,
        enrollment_id: &str,
        section_id: &str,
        category: EvaluationCategory,
    ) -> AulaResult<Vec<RawScore>>;
}

/// Derived-table storage: category averages, final grades, the append-only
/// audit log, weight configuration, and cached section statistics.
pub trait IGradeStorage: Send + Sync {
    // --- Category averages ---
    fn upsert_category_average(&self, average: &CategoryAverage) -> AulaResult<()>;
    fn category_averages(
        &self,
        enrollment_id: &str,
        section_id: &str,
    ) -> AulaResult<Vec<CategoryAverage>>;

    // --- Final grades ---
    fn upsert_final_grade(&self, grade: &FinalGrade) -> AulaResult<()>;
    fn final_grade(&self, enrollment_id: &str, section_id: &str)
        -> AulaResult<Option<FinalGrade>>;
    fn final_grades_for_section(&self, section_id: &str) -> AulaResult<Vec<FinalGrade>>;

    // --- Audit (append-only) ---
    fn append_audit(&self, record: &AuditRecord) -> AulaResult<i64>;
    fn audit_history_for_enrollment(&self, enrollment_id: &str) -> AulaResult<Vec<AuditEntry>>;
    fn audit_history_for_score(&self, raw_score_id: &str) -> AulaResult<Vec<AuditEntry>>;

    // --- Weight configuration ---
    fn section_weights(&self, section_id: &str) -> AulaResult<Vec<CategoryWeight>>;
    fn set_section_weight(&self, weight: &CategoryWeight) -> AulaResult<()>;

    // --- Section statistics cache ---
    fn replace_section_statistics(
        &self,
        section_id: &str,
        statistics: &[SectionStatistic],
    ) -> AulaResult<()>;
    fn section_statistics(
        &self,
        section_id: &str,
        category: Option<EvaluationCategory>,
    ) -> AulaResult<Vec<SectionStatistic>>;
}
