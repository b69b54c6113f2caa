//! Declarative strategies: the escape-time computation expressed as a
//! recursive SQL fixed point instead of a loop.

#[cfg(feature = "duckdb")]
pub mod duckdb;
pub mod sqlite;

use crate::field::FieldParams;

/// Recursive-CTE formulation shared by the SQL engines.
///
/// Pixel indices are generated as recursive *integers* and mapped to
/// plane coordinates with the same expression the scalar kernel uses;
/// generating the axes by repeatedly adding a float step would
/// accumulate rounding drift and break exact equivalence. The iteration
/// relation extends a pixel's chain only while the bound has not been
/// reached and the previous row has not escaped (`<= 4.0`, the dual of
/// the kernel's strict `> 4.0` escape test), so `MAX(iteration)` per
/// pixel equals the scalar result. No ORDER BY: the caller scatters
/// rows by coordinate.
pub(crate) fn recursive_field_query(params: &FieldParams) -> String {
    let wm1 = params.width - 1;
    let hm1 = params.height - 1;
    let max = params.max_iterations;
    format!(
        "WITH RECURSIVE
           xaxis(x) AS (
             SELECT 0
             UNION ALL
             SELECT x + 1 FROM xaxis WHERE x < {wm1}
           ),
           yaxis(y) AS (
             SELECT 0
             UNION ALL
             SELECT y + 1 FROM yaxis WHERE y < {hm1}
           ),
           pixels AS (
             SELECT
               x,
               y,
               -2.5 + (x * 3.5 / {wm1}.0) AS cx,
               -1.0 + (y * 2.0 / {hm1}.0) AS cy
             FROM xaxis, yaxis
           ),
           iterations(x, y, cx, cy, zx, zy, iteration) AS (
             SELECT x, y, cx, cy, 0.0, 0.0, 0 FROM pixels

             UNION ALL

             SELECT
               x,
               y,
               cx,
               cy,
               zx * zx - zy * zy + cx,
               2.0 * zx * zy + cy,
               iteration + 1
             FROM iterations
             WHERE iteration < {max}
               AND (zx * zx + zy * zy) <= 4.0
           )
         SELECT x, y, MAX(iteration) AS depth
         FROM iterations
         GROUP BY x, y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_embeds_grid_constants() {
        let params = FieldParams::new(1400, 800, 256).unwrap();
        let query = recursive_field_query(&params);
        assert!(query.contains("x < 1399"));
        assert!(query.contains("y < 799"));
        assert!(query.contains("iteration < 256"));
        assert!(query.contains("3.5 / 1399.0"));
    }
}
