//! The per-pixel escape-time kernel. Every other strategy in this crate
//! is a re-expression of this function and must agree with it exactly.

/// Number of `z <- z^2 + c` iterations before `|z|` exceeds 2, capped at
/// `max_iterations` for points that never escape.
///
/// The escape test uses the squared magnitude (`zx^2 + zy^2 > 4.0`, no
/// square root) and runs *before* each update: the returned value is the
/// iteration index at which escape was detected, i.e. the number of
/// updates applied so far. Getting this ordering wrong is the easiest
/// way to make two strategies disagree by one.
#[inline]
pub fn escape_time(cx: f64, cy: f64, max_iterations: u32) -> u32 {
    let mut zx = 0.0_f64;
    let mut zy = 0.0_f64;
    let mut iteration = 0_u32;

    while iteration < max_iterations {
        if zx * zx + zy * zy > 4.0 {
            break;
        }
        let next_zx = zx * zx - zy * zy + cx;
        zy = 2.0 * zx * zy + cy;
        zx = next_zx;
        iteration += 1;
    }

    iteration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_never_escapes() {
        assert_eq!(escape_time(0.0, 0.0, 256), 256);
        assert_eq!(escape_time(0.0, 0.0, 1), 1);
    }

    #[test]
    fn test_far_point_escapes_immediately() {
        // c = -2.5 - 1.0i has |z_1|^2 = 7.25, detected at iteration 1.
        assert_eq!(escape_time(-2.5, -1.0, 256), 1);
    }

    #[test]
    fn test_escape_is_strictly_greater_than_four() {
        // c = 1: z_1 = 1, z_2 = 2 with |z_2|^2 exactly 4 (not an escape),
        // z_3 = 5. Escape is detected at iteration 3, not 2.
        assert_eq!(escape_time(1.0, 0.0, 256), 3);
    }

    #[test]
    fn test_cap_applies() {
        // Real axis [-2, 0.25] is inside the set; -0.75 never escapes.
        assert_eq!(escape_time(-0.75, 0.0, 4), 4);
        assert_eq!(escape_time(-0.75, 0.0, 10_000), 10_000);
    }
}
