//! Final grades: upsert keyed on (enrollment, section), section scans.

use rusqlite::{params, Connection, OptionalExtension};

use aula_core::errors::AulaResult;
use aula_core::models::{
    CategoryBreakdown, CategorySummary, FinalGrade, GradePoints, Percent,
};

use crate::to_storage_err;

use super::parse_dt;

/// Insert or overwrite the final grade for its natural key.
pub fn upsert_final_grade(conn: &Connection, grade: &FinalGrade) -> AulaResult<()> {
    conn.execute(
        "INSERT INTO final_grades (
            enrollment_id, section_id,
            formative_percent, formative_count,
            summative_percent, summative_count,
            final_exam_percent, final_exam_count,
            weighted_percent, score_on_20, total_activities, computed_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        ON CONFLICT(enrollment_id, section_id) DO UPDATE SET
            formative_percent = excluded.formative_percent,
            formative_count = excluded.formative_count,
            summative_percent = excluded.summative_percent,
            summative_count = excluded.summative_count,
            final_exam_percent = excluded.final_exam_percent,
            final_exam_count = excluded.final_exam_count,
            weighted_percent = excluded.weighted_percent,
            score_on_20 = excluded.score_on_20,
            total_activities = excluded.total_activities,
            computed_at = excluded.computed_at",
        params![
            grade.enrollment_id,
            grade.section_id,
            grade.breakdown.formative.average.value(),
            grade.breakdown.formative.activity_count,
            grade.breakdown.summative.average.value(),
            grade.breakdown.summative.activity_count,
            grade.breakdown.final_exam.average.value(),
            grade.breakdown.final_exam.activity_count,
            grade.weighted_percent.value(),
            grade.score_on_20.value(),
            grade.total_activities,
            grade.computed_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Fetch one final grade, or None if it was never computed.
pub fn get_final_grade(
    conn: &Connection,
    enrollment_id: &str,
    section_id: &str,
) -> AulaResult<Option<FinalGrade>> {
    let mut stmt = conn
        .prepare(&format!(
            "{SELECT_COLUMNS} FROM final_grades
             WHERE enrollment_id = ?1 AND section_id = ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![enrollment_id, section_id], row_to_final_grade)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    result.transpose()
}

/// All final grades in a section, one per enrollment.
pub fn grades_for_section(conn: &Connection, section_id: &str) -> AulaResult<Vec<FinalGrade>> {
    let mut stmt = conn
        .prepare(&format!(
            "{SELECT_COLUMNS} FROM final_grades
             WHERE section_id = ?1 ORDER BY enrollment_id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![section_id], row_to_final_grade)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter().collect()
}

const SELECT_COLUMNS: &str = "SELECT enrollment_id, section_id,
        formative_percent, formative_count,
        summative_percent, summative_count,
        final_exam_percent, final_exam_count,
        weighted_percent, score_on_20, total_activities, computed_at";

fn row_to_final_grade(row: &rusqlite::Row<'_>) -> rusqlite::Result<AulaResult<FinalGrade>> {
    let enrollment_id: String = row.get(0)?;
    let section_id: String = row.get(1)?;
    let breakdown = CategoryBreakdown {
        formative: CategorySummary {
            average: Percent::new(row.get(2)?),
            activity_count: row.get(3)?,
        },
        summative: CategorySummary {
            average: Percent::new(row.get(4)?),
            activity_count: row.get(5)?,
        },
        final_exam: CategorySummary {
            average: Percent::new(row.get(6)?),
            activity_count: row.get(7)?,
        },
    };
    let weighted_percent: f64 = row.get(8)?;
    let score_on_20: f64 = row.get(9)?;
    let total_activities: u32 = row.get(10)?;
    let computed_at_str: String = row.get(11)?;

    Ok((|| {
        Ok(FinalGrade {
            enrollment_id,
            section_id,
            breakdown,
            weighted_percent: Percent::new(weighted_percent),
            score_on_20: GradePoints::new(score_on_20),
            total_activities,
            computed_at: parse_dt(&computed_at_str)?,
        })
    })())
}
