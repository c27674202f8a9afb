//! Integration test: section statistics cache over real final grades.

use std::sync::Arc;

use aula_core::config::GradingConfig;
use aula_core::models::{CategoryWeight, EvaluationCategory, Percent, ScoreChange};
use aula_core::traits::{IGradeStorage, IScoreLedger};
use aula_grading::{GradingPipeline, SectionStatsCache};
use aula_storage::StorageEngine;

fn setup() -> (Arc<StorageEngine>, GradingPipeline, SectionStatsCache) {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    let ledger: Arc<dyn IScoreLedger> = engine.clone();
    let storage: Arc<dyn IGradeStorage> = engine.clone();
    let stats_storage: Arc<dyn IGradeStorage> = engine.clone();
    (
        engine,
        GradingPipeline::new(ledger, storage, GradingConfig::default()),
        SectionStatsCache::new(stats_storage, GradingConfig::default()),
    )
}

fn summative_change(enrollment: &str, obtained: f64) -> ScoreChange {
    ScoreChange {
        enrollment_id: enrollment.to_string(),
        section_id: "sec-1".to_string(),
        activity_id: "exam-1".to_string(),
        category: EvaluationCategory::Summative,
        obtained,
        max_possible: Some(20.0),
        reason: None,
        actor_id: None,
    }
}

#[test]
fn cohort_statistics_with_pass_threshold() {
    // Three enrollments at 8, 12 and 16 of 20 in the summative category;
    // threshold 11 => 2 pass, 1 fail, rate ~66.7, mean 12.
    let (_engine, pipeline, stats) = setup();
    for (enrollment, obtained) in [("enr-1", 8.0), ("enr-2", 12.0), ("enr-3", 16.0)] {
        pipeline
            .record_score_change(&summative_change(enrollment, obtained))
            .unwrap();
    }

    let rows = stats.refresh("sec-1").unwrap();
    assert_eq!(rows.len(), 3);

    let summative = rows
        .iter()
        .find(|s| s.category == EvaluationCategory::Summative)
        .unwrap();
    assert_eq!(summative.student_count, 3);
    assert_eq!(summative.evaluation_count, 3);
    assert_eq!(summative.pass_count, 2);
    assert_eq!(summative.fail_count, 1);
    assert_eq!(summative.mean, 12.0);
    assert_eq!(summative.min, 8.0);
    assert_eq!(summative.max, 16.0);
    assert!((summative.pass_rate_percent.value() - 66.666).abs() < 0.001);
}

#[test]
fn refresh_replaces_rather_than_accumulates() {
    let (_engine, pipeline, stats) = setup();
    pipeline
        .record_score_change(&summative_change("enr-1", 10.0))
        .unwrap();

    stats.refresh("sec-1").unwrap();
    stats.refresh("sec-1").unwrap();

    // Still exactly one row per category after repeated refreshes.
    let rows = stats.statistics("sec-1", None, false).unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn stale_until_refreshed() {
    let (_engine, pipeline, stats) = setup();
    pipeline
        .record_score_change(&summative_change("enr-1", 8.0))
        .unwrap();
    stats.refresh("sec-1").unwrap();

    // A later write does not touch the cache...
    pipeline
        .record_score_change(&summative_change("enr-2", 18.0))
        .unwrap();
    let cached = stats.statistics("sec-1", Some(EvaluationCategory::Summative), false).unwrap();
    assert_eq!(cached[0].student_count, 1);

    // ...until the next refresh.
    let fresh = stats.statistics("sec-1", Some(EvaluationCategory::Summative), true).unwrap();
    assert_eq!(fresh[0].student_count, 2);
}

#[test]
fn category_filter_restricts_rows() {
    let (_engine, pipeline, stats) = setup();
    pipeline
        .record_score_change(&summative_change("enr-1", 14.0))
        .unwrap();
    stats.refresh("sec-1").unwrap();

    let rows = stats
        .statistics("sec-1", Some(EvaluationCategory::FinalExam), false)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, EvaluationCategory::FinalExam);
    assert_eq!(rows[0].student_count, 1);
}

#[test]
fn sections_are_independent() {
    let (engine, pipeline, stats) = setup();
    // Custom weights in another section must not leak into sec-1 stats.
    engine
        .set_section_weight(&CategoryWeight {
            section_id: "sec-2".to_string(),
            category: EvaluationCategory::Summative,
            weight_percent: Percent::new(100.0),
        })
        .unwrap();
    pipeline
        .record_score_change(&summative_change("enr-1", 14.0))
        .unwrap();

    assert!(stats.refresh("sec-2").unwrap()[0].student_count == 0);
    let rows = stats.statistics("sec-1", None, true).unwrap();
    assert!(rows.iter().all(|r| r.section_id == "sec-1"));
}
