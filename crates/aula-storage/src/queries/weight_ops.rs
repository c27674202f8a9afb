//! Per-section category weight configuration.

use rusqlite::{params, Connection};

use aula_core::errors::AulaResult;
use aula_core::models::{CategoryWeight, Percent};

use crate::to_storage_err;

use super::parse_category;

/// All configured weight rows for a section (0–3 rows; missing categories
/// fall back to the documented defaults at composition time).
pub fn weights_for_section(conn: &Connection, section_id: &str) -> AulaResult<Vec<CategoryWeight>> {
    let mut stmt = conn
        .prepare(
            "SELECT section_id, category, weight_percent
             FROM category_weights WHERE section_id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![section_id], |row| {
            let section_id: String = row.get(0)?;
            let category: String = row.get(1)?;
            let weight: f64 = row.get(2)?;
            Ok((section_id, category, weight))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter()
        .map(|(section_id, category, weight)| {
            Ok(CategoryWeight {
                section_id,
                category: parse_category(&category)?,
                weight_percent: Percent::new(weight),
            })
        })
        .collect()
}

/// Insert or overwrite one weight row.
pub fn set_weight(conn: &Connection, weight: &CategoryWeight) -> AulaResult<()> {
    conn.execute(
        "INSERT INTO category_weights (section_id, category, weight_percent)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(section_id, category) DO UPDATE SET
            weight_percent = excluded.weight_percent",
        params![
            weight.section_id,
            weight.category.as_str(),
            weight.weight_percent.value(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
