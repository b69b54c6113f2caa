//! Field colorization and PNG output. Escaped cells are log-scaled and
//! run through a hot black-red-yellow-white gradient; in-set cells stay
//! black.

use crate::field::EscapeField;
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::path::Path;

pub fn colorize(field: &EscapeField, max_iterations: u32) -> RgbImage {
    // Normalize against the largest log value actually present so the
    // gradient uses its full range at any iteration bound.
    let mut log_max = 0.0_f64;
    for &v in field.values() {
        if v < max_iterations {
            log_max = log_max.max(((v + 1) as f64).ln());
        }
    }

    let mut img = RgbImage::new(field.width(), field.height());
    for y in 0..field.height() {
        for x in 0..field.width() {
            let v = field.get(x, y);
            let t = if v >= max_iterations || log_max <= 0.0 {
                0.0
            } else {
                ((v + 1) as f64).ln() / log_max
            };
            img.put_pixel(x, y, Rgb(hot_color(t)));
        }
    }
    img
}

/// Piecewise-linear "hot" ramp: black -> red -> yellow -> white.
fn hot_color(t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let r = (t * 3.0).min(1.0);
    let g = ((t - 1.0 / 3.0) * 3.0).clamp(0.0, 1.0);
    let b = ((t - 2.0 / 3.0) * 3.0).clamp(0.0, 1.0);
    [
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    ]
}

pub fn save_field_image(
    field: &EscapeField,
    max_iterations: u32,
    path: &Path,
) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
    }
    let img = colorize(field, max_iterations);
    img.save(path)
        .with_context(|| format!("failed to save {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{scalar, FieldParams};

    #[test]
    fn test_image_shape_matches_field() {
        let params = FieldParams::new(17, 13, 50).unwrap();
        let field = scalar::compute(&params);
        let img = colorize(&field, 50);
        assert_eq!(img.dimensions(), (17, 13));
    }

    #[test]
    fn test_in_set_cells_are_black() {
        // Pixel (5, 2) of an 8x5 grid is c = 0, which never escapes.
        let params = FieldParams::new(8, 5, 64).unwrap();
        let field = scalar::compute(&params);
        let img = colorize(&field, 64);
        assert_eq!(*img.get_pixel(5, 2), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_hot_ramp_endpoints() {
        assert_eq!(hot_color(0.0), [0, 0, 0]);
        assert_eq!(hot_color(1.0), [255, 255, 255]);
        let mid = hot_color(0.5);
        assert_eq!(mid[0], 255);
        assert!(mid[1] > 0 && mid[1] < 255);
        assert_eq!(mid[2], 0);
    }
}
