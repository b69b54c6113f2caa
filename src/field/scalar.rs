//! Scalar field strategies: the sequential reference implementation and
//! a rayon row-parallel variant of the same per-pixel kernel.

use super::kernel::escape_time;
use super::{EscapeField, FieldParams};
use rayon::prelude::*;

/// Sequential reference implementation. Simplest to prove correct; the
/// oracle every other strategy is checked against.
pub fn compute(params: &FieldParams) -> EscapeField {
    let mut field = EscapeField::filled(params, 0);
    for y in 0..params.height {
        for x in 0..params.width {
            let (cx, cy) = params.pixel_to_plane(x, y);
            field.set(x, y, escape_time(cx, cy, params.max_iterations));
        }
    }
    field
}

/// Same kernel, rows distributed across threads. Pixels are independent,
/// so each row chunk owns a disjoint output slice and no synchronization
/// is needed.
pub fn compute_parallel(params: &FieldParams) -> EscapeField {
    let p = *params;
    let mut field = EscapeField::filled(params, 0);
    field
        .values_mut()
        .par_chunks_exact_mut(p.width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            for (x, cell) in row.iter_mut().enumerate() {
                let (cx, cy) = p.pixel_to_plane(x as u32, y);
                *cell = escape_time(cx, cy, p.max_iterations);
            }
        });
    field
}
