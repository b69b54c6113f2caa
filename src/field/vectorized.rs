//! Whole-grid masked strategy: iterate every live pixel at once over
//! dense state planes, freezing cells into the output the round they
//! escape. Rounds run four to a pass; each round still checks the
//! iteration bound and the live mask, so a bound that is not a multiple
//! of the unroll factor gets its tail rounds checked individually.

use super::{EscapeField, FieldParams};
use ndarray::{Array2, Zip};

const UNROLL: u32 = 4;

pub fn compute(params: &FieldParams) -> EscapeField {
    let shape = (params.height as usize, params.width as usize);
    let max = params.max_iterations;

    let cx = Array2::from_shape_fn(shape, |(y, x)| {
        params.pixel_to_plane(x as u32, y as u32).0
    });
    let cy = Array2::from_shape_fn(shape, |(y, x)| {
        params.pixel_to_plane(x as u32, y as u32).1
    });

    let mut zx = Array2::<f64>::zeros(shape);
    let mut zy = Array2::<f64>::zeros(shape);
    let mut alive = Array2::<bool>::from_elem(shape, true);
    // Cells that never escape keep this initial value.
    let mut out = Array2::<u32>::from_elem(shape, max);

    let mut round = 0_u32;
    'passes: loop {
        for _ in 0..UNROLL {
            if round >= max {
                break 'passes;
            }
            round += 1;

            let mut any_alive = false;
            Zip::from(&mut zx)
                .and(&mut zy)
                .and(&mut alive)
                .and(&mut out)
                .and(&cx)
                .and(&cy)
                .for_each(|zx, zy, alive, out, &cx, &cy| {
                    if !*alive {
                        return;
                    }
                    let next_zx = *zx * *zx - *zy * *zy + cx;
                    *zy = 2.0 * *zx * *zy + cy;
                    *zx = next_zx;
                    if *zx * *zx + *zy * *zy > 4.0 {
                        // First round the escape is observed; identical
                        // to the scalar kernel's detection index.
                        *out = round;
                        *alive = false;
                    } else {
                        any_alive = true;
                    }
                });

            if !any_alive {
                break 'passes;
            }
        }
    }

    let mut field = EscapeField::filled(params, 0);
    for (cell, &value) in field.values_mut().iter_mut().zip(out.iter()) {
        *cell = value;
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::scalar;
    use crate::field::verify::compare_fields;

    #[test]
    fn test_matches_scalar_oracle() {
        for (w, h, max) in [(2, 2, 10), (17, 13, 50), (64, 40, 128)] {
            let params = FieldParams::new(w, h, max).unwrap();
            let oracle = scalar::compute(&params);
            let vectorized = compute(&params);
            compare_fields(&oracle, &vectorized).unwrap();
        }
    }

    #[test]
    fn test_bound_not_multiple_of_unroll() {
        // 97 and 3 both leave tail rounds after the 4x passes.
        for max in [3, 5, 97] {
            let params = FieldParams::new(17, 13, max).unwrap();
            let oracle = scalar::compute(&params);
            let vectorized = compute(&params);
            compare_fields(&oracle, &vectorized).unwrap();
        }
    }

    #[test]
    fn test_hand_computed_3x3_field() {
        let params = FieldParams::new(3, 3, 4).unwrap();
        let field = compute(&params);
        let expected = [[1, 3, 2], [1, 4, 3], [1, 3, 2]];
        for y in 0..3u32 {
            for x in 0..3u32 {
                assert_eq!(field.get(x, y), expected[y as usize][x as usize]);
            }
        }
    }
}
