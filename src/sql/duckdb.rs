//! DuckDB variant of the declarative strategy. Same query shape as the
//! SQLite engine; only the driver differs.

use super::recursive_field_query;
use crate::field::{EscapeField, FieldParams};
use anyhow::{Context, Result};
use duckdb::Connection;

pub fn compute(params: &FieldParams) -> Result<EscapeField> {
    let conn =
        Connection::open_in_memory().context("failed to open in-memory DuckDB database")?;
    let query = recursive_field_query(params);
    let mut stmt = conn
        .prepare(&query)
        .context("failed to prepare recursive escape-time query")?;

    let mut field = EscapeField::filled(params, 0);
    let mut covered = 0_usize;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;
    for row in rows {
        let (x, y, depth) = row?;
        if x < 0 || x >= params.width as i64 || y < 0 || y >= params.height as i64 {
            return Err(anyhow::anyhow!(
                "query returned out-of-range pixel ({}, {})",
                x,
                y
            ));
        }
        field.set(x as u32, y as u32, depth as u32);
        covered += 1;
    }

    if covered != params.pixel_count() {
        return Err(anyhow::anyhow!(
            "query covered {} pixels, expected {}",
            covered,
            params.pixel_count()
        ));
    }

    Ok(field)
}
