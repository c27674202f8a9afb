//! Property tests: range invariants and idempotence of the pure compute
//! functions.

use chrono::Utc;
use proptest::prelude::*;

use aula_core::config::GradingConfig;
use aula_core::models::{
    CategoryBreakdown, CategorySummary, EvaluationCategory, Percent, RawScore, SectionWeights,
};
use aula_grading::aggregator::average_percent;
use aula_grading::calculator::compose;

fn score(obtained: f64, max: f64) -> RawScore {
    RawScore {
        id: "score".to_string(),
        enrollment_id: "enr-1".to_string(),
        section_id: "sec-1".to_string(),
        activity_id: "act-1".to_string(),
        category: EvaluationCategory::Formative,
        obtained,
        max_possible: Some(max),
        recorded_at: Utc::now(),
    }
}

fn breakdown(f: f64, s: f64, x: f64) -> CategoryBreakdown {
    CategoryBreakdown {
        formative: CategorySummary {
            average: Percent::new(f),
            activity_count: 1,
        },
        summative: CategorySummary {
            average: Percent::new(s),
            activity_count: 1,
        },
        final_exam: CategorySummary {
            average: Percent::new(x),
            activity_count: 1,
        },
    }
}

proptest! {
    #[test]
    fn average_stays_in_percent_range(
        values in prop::collection::vec((0.0f64..=20.0, 1.0f64..=20.0), 0..30)
    ) {
        let scores: Vec<RawScore> = values
            .iter()
            .map(|(obtained, max)| score(obtained.min(*max), *max))
            .collect();
        let (avg, count) = average_percent(&scores, 20.0);
        prop_assert!(avg.value() >= 0.0 && avg.value() <= 100.0);
        prop_assert!(avg.value().is_finite());
        prop_assert_eq!(count as usize, scores.len());
    }

    #[test]
    fn weighted_grade_stays_in_range(
        f in 0.0f64..=100.0,
        s in 0.0f64..=100.0,
        x in 0.0f64..=100.0,
        wf in 0.0f64..=100.0,
        ws in 0.0f64..=100.0,
        wx in 0.0f64..=100.0,
    ) {
        let mut weights = SectionWeights::defaults(&GradingConfig::default());
        weights.set(EvaluationCategory::Formative, Percent::new(wf));
        weights.set(EvaluationCategory::Summative, Percent::new(ws));
        weights.set(EvaluationCategory::FinalExam, Percent::new(wx));

        let grade = compose("enr-1", "sec-1", &breakdown(f, s, x), &weights, Utc::now());
        prop_assert!(grade.weighted_percent.value() >= 0.0);
        prop_assert!(grade.weighted_percent.value() <= 100.0);
        prop_assert!(grade.score_on_20.value() >= 0.0);
        prop_assert!(grade.score_on_20.value() <= 20.0);
    }

    #[test]
    fn composition_is_idempotent(
        f in 0.0f64..=100.0,
        s in 0.0f64..=100.0,
        x in 0.0f64..=100.0,
    ) {
        let weights = SectionWeights::defaults(&GradingConfig::default());
        let b = breakdown(f, s, x);
        let now = Utc::now();
        let first = compose("enr-1", "sec-1", &b, &weights, now);
        let second = compose("enr-1", "sec-1", &b, &weights, now);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn score_on_20_tracks_weighted_percent(
        f in 0.0f64..=100.0,
        s in 0.0f64..=100.0,
        x in 0.0f64..=100.0,
    ) {
        let weights = SectionWeights::defaults(&GradingConfig::default());
        let grade = compose("enr-1", "sec-1", &breakdown(f, s, x), &weights, Utc::now());
        let expected = grade.weighted_percent.value() * 20.0 / 100.0;
        prop_assert!((grade.score_on_20.value() - expected).abs() < 1e-9);
    }
}
