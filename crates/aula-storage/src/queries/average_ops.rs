//! Category averages: upsert keyed on (enrollment, section, category).

use rusqlite::{params, Connection};

use aula_core::errors::AulaResult;
use aula_core::models::{CategoryAverage, Percent};

use crate::to_storage_err;

use super::{parse_category, parse_dt};

/// Insert or overwrite the average for its natural key. The conflict clause
/// guarantees at most one row per (enrollment, section, category).
pub fn upsert_average(conn: &Connection, average: &CategoryAverage) -> AulaResult<()> {
    conn.execute(
        "INSERT INTO category_averages (
            enrollment_id, section_id, category, average_percent,
            activity_count, computed_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(enrollment_id, section_id, category) DO UPDATE SET
            average_percent = excluded.average_percent,
            activity_count = excluded.activity_count,
            computed_at = excluded.computed_at",
        params![
            average.enrollment_id,
            average.section_id,
            average.category.as_str(),
            average.average.value(),
            average.activity_count,
            average.computed_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// All averages for one enrollment in one section (0–3 rows).
pub fn averages_for_enrollment(
    conn: &Connection,
    enrollment_id: &str,
    section_id: &str,
) -> AulaResult<Vec<CategoryAverage>> {
    let mut stmt = conn
        .prepare(
            "SELECT enrollment_id, section_id, category, average_percent,
                    activity_count, computed_at
             FROM category_averages
             WHERE enrollment_id = ?1 AND section_id = ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![enrollment_id, section_id], |row| {
            let category_str: String = row.get(2)?;
            let computed_at_str: String = row.get(5)?;
            let enrollment_id: String = row.get(0)?;
            let section_id: String = row.get(1)?;
            let average_percent: f64 = row.get(3)?;
            let activity_count: u32 = row.get(4)?;
            Ok((
                enrollment_id,
                section_id,
                category_str,
                average_percent,
                activity_count,
                computed_at_str,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter()
        .map(
            |(enrollment_id, section_id, category, average, count, computed_at)| {
                Ok(CategoryAverage {
                    enrollment_id,
                    section_id,
                    category: parse_category(&category)?,
                    average: Percent::new(average),
                    activity_count: count,
                    computed_at: parse_dt(&computed_at)?,
                })
            },
        )
        .collect()
}

/// Number of average rows for one natural key. Used by the uniqueness tests.
pub fn count_for_key(
    conn: &Connection,
    enrollment_id: &str,
    section_id: &str,
    category: aula_core::models::EvaluationCategory,
) -> AulaResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM category_averages
             WHERE enrollment_id = ?1 AND section_id = ?2 AND category = ?3",
            params![enrollment_id, section_id, category.as_str()],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}
