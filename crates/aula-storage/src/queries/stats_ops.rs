//! Section statistics cache: delete-and-reinsert per section, never
//! incremental.

use rusqlite::{params, Connection};

use aula_core::errors::AulaResult;
use aula_core::models::{EvaluationCategory, Percent, SectionStatistic};

use crate::to_storage_err;

use super::{parse_category, parse_dt};

/// Replace every cached row for a section with the freshly computed batch.
/// Runs in one transaction so readers never observe a half-replaced cache.
pub fn replace_for_section(
    conn: &Connection,
    section_id: &str,
    statistics: &[SectionStatistic],
) -> AulaResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("replace_stats begin: {e}")))?;

    let result = (|| {
        tx.execute(
            "DELETE FROM section_statistics WHERE section_id = ?1",
            params![section_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

        for stat in statistics {
            tx.execute(
                "INSERT INTO section_statistics (
                    section_id, category, student_count, evaluation_count,
                    mean, min, max, pass_count, fail_count,
                    pass_rate_percent, refreshed_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    stat.section_id,
                    stat.category.as_str(),
                    stat.student_count,
                    stat.evaluation_count,
                    stat.mean,
                    stat.min,
                    stat.max,
                    stat.pass_count,
                    stat.fail_count,
                    stat.pass_rate_percent.value(),
                    stat.refreshed_at.to_rfc3339(),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        }
        Ok(())
    })();

    match result {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("replace_stats commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

/// Cached rows for a section, optionally restricted to one category.
pub fn stats_for_section(
    conn: &Connection,
    section_id: &str,
    category: Option<EvaluationCategory>,
) -> AulaResult<Vec<SectionStatistic>> {
    let mut sql = String::from(
        "SELECT section_id, category, student_count, evaluation_count,
                mean, min, max, pass_count, fail_count,
                pass_rate_percent, refreshed_at
         FROM section_statistics WHERE section_id = ?1",
    );
    if category.is_some() {
        sql.push_str(" AND category = ?2");
    }
    sql.push_str(" ORDER BY category");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let map_row = |row: &rusqlite::Row<'_>| {
        let section_id: String = row.get(0)?;
        let category: String = row.get(1)?;
        let student_count: u32 = row.get(2)?;
        let evaluation_count: u32 = row.get(3)?;
        let mean: f64 = row.get(4)?;
        let min: f64 = row.get(5)?;
        let max: f64 = row.get(6)?;
        let pass_count: u32 = row.get(7)?;
        let fail_count: u32 = row.get(8)?;
        let pass_rate: f64 = row.get(9)?;
        let refreshed_at: String = row.get(10)?;
        Ok((
            section_id,
            category,
            student_count,
            evaluation_count,
            mean,
            min,
            max,
            pass_count,
            fail_count,
            pass_rate,
            refreshed_at,
        ))
    };

    let rows = match category {
        Some(c) => stmt
            .query_map(params![section_id, c.as_str()], map_row)
            .map_err(|e| to_storage_err(e.to_string()))?
            .collect::<Result<Vec<_>, _>>(),
        None => stmt
            .query_map(params![section_id], map_row)
            .map_err(|e| to_storage_err(e.to_string()))?
            .collect::<Result<Vec<_>, _>>(),
    }
    .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter()
        .map(
            |(
                section_id,
                category,
                student_count,
                evaluation_count,
                mean,
                min,
                max,
                pass_count,
                fail_count,
                pass_rate,
                refreshed_at,
            )| {
                Ok(SectionStatistic {
                    section_id,
                    category: parse_category(&category)?,
                    student_count,
                    evaluation_count,
                    mean,
                    min,
                    max,
                    pass_count,
                    fail_count,
                    pass_rate_percent: Percent::new(pass_rate),
                    refreshed_at: parse_dt(&refreshed_at)?,
                })
            },
        )
        .collect()
}
