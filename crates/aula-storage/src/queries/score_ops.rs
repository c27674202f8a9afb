//! Raw score ledger: upsert and per-category reads.

use rusqlite::{params, Connection, OptionalExtension};

use aula_core::errors::AulaResult;
use aula_core::models::{EvaluationCategory, RawScore};
use aula_core::traits::ScoreUpsert;

use crate::to_storage_err;

use super::{parse_category, parse_dt};

/// Insert or overwrite the score for (enrollment, activity).
/// Returns the surviving row id and the previous obtained value, so the
/// caller can build the audit entry. Read + write run in one transaction.
pub fn upsert_score(conn: &Connection, score: &RawScore) -> AulaResult<ScoreUpsert> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("upsert_score begin: {e}")))?;

    let result = upsert_score_inner(&tx, score);
    match result {
        Ok(upsert) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("upsert_score commit: {e}")))?;
            Ok(upsert)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn upsert_score_inner(conn: &Connection, score: &RawScore) -> AulaResult<ScoreUpsert> {
    let existing: Option<(String, f64)> = conn
        .query_row(
            "SELECT id, obtained FROM raw_scores
             WHERE enrollment_id = ?1 AND activity_id = ?2",
            params![score.enrollment_id, score.activity_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match existing {
        Some((id, previous)) => {
            conn.execute(
                "UPDATE raw_scores SET
                    section_id = ?2, category = ?3, obtained = ?4,
                    max_possible = ?5, recorded_at = ?6
                 WHERE id = ?1",
                params![
                    id,
                    score.section_id,
                    score.category.as_str(),
                    score.obtained,
                    score.max_possible,
                    score.recorded_at.to_rfc3339(),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(ScoreUpsert {
                raw_score_id: id,
                previous_value: Some(previous),
            })
        }
        None => {
            conn.execute(
                "INSERT INTO raw_scores (
                    id, enrollment_id, section_id, activity_id, category,
                    obtained, max_possible, recorded_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    score.id,
                    score.enrollment_id,
                    score.section_id,
                    score.activity_id,
                    score.category.as_str(),
                    score.obtained,
                    score.max_possible,
                    score.recorded_at.to_rfc3339(),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(ScoreUpsert {
                raw_score_id: score.id.clone(),
                previous_value: None,
            })
        }
    }
}

/// All current scores for one category of one enrollment in one section.
pub fn scores_for_category(
    conn: &Connection,
    enrollment_id: &str,
    section_id: &str,
    category: EvaluationCategory,
) -> AulaResult<Vec<RawScore>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, enrollment_id, section_id, activity_id, category,
                    obtained, max_possible, recorded_at
             FROM raw_scores
             WHERE enrollment_id = ?1 AND section_id = ?2 AND category = ?3
             ORDER BY activity_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(
            params![enrollment_id, section_id, category.as_str()],
            row_to_raw_score,
        )
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter().collect()
}

fn row_to_raw_score(row: &rusqlite::Row<'_>) -> rusqlite::Result<AulaResult<RawScore>> {
    let category_str: String = row.get(4)?;
    let recorded_at_str: String = row.get(7)?;
    let id: String = row.get(0)?;
    let enrollment_id: String = row.get(1)?;
    let section_id: String = row.get(2)?;
    let activity_id: String = row.get(3)?;
    let obtained: f64 = row.get(5)?;
    let max_possible: Option<f64> = row.get(6)?;

    Ok((|| {
        Ok(RawScore {
            id,
            enrollment_id,
            section_id,
            activity_id,
            category: parse_category(&category_str)?,
            obtained,
            max_possible,
            recorded_at: parse_dt(&recorded_at_str)?,
        })
    })())
}
