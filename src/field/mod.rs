//! Escape-time field computation: the shared data model and the CPU
//! strategies that produce it.

pub mod kernel;
pub mod scalar;
#[cfg(feature = "simd")]
pub mod simd;
pub mod vectorized;
pub mod verify;

use anyhow::Result;
use ndarray::Array2;

/// Real-axis range of the rendered viewport.
pub const RE_MIN: f64 = -2.5;
pub const RE_MAX: f64 = 1.0;
/// Imaginary-axis range of the rendered viewport.
pub const IM_MIN: f64 = -1.0;
pub const IM_MAX: f64 = 1.0;

pub const RE_SPAN: f64 = RE_MAX - RE_MIN;
pub const IM_SPAN: f64 = IM_MAX - IM_MIN;

/// Validated inputs for one field computation. The pixel-to-plane map
/// divides by `width - 1` and `height - 1`, so degenerate grids are
/// rejected here, before any strategy starts iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldParams {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
}

impl FieldParams {
    pub fn new(width: u32, height: u32, max_iterations: u32) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(anyhow::anyhow!(
                "grid must be at least 2x2, got {}x{}",
                width,
                height
            ));
        }
        if max_iterations < 1 {
            return Err(anyhow::anyhow!("max_iterations must be at least 1"));
        }
        Ok(Self {
            width,
            height,
            max_iterations,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Map a pixel to its complex-plane coordinate. Every strategy must
    /// apply this exact expression (same operations, same order) or the
    /// equivalence check will catch the drift.
    #[inline]
    pub fn pixel_to_plane(&self, x: u32, y: u32) -> (f64, f64) {
        let cx = RE_MIN + x as f64 * RE_SPAN / (self.width - 1) as f64;
        let cy = IM_MIN + y as f64 * IM_SPAN / (self.height - 1) as f64;
        (cx, cy)
    }
}

/// Dense row-major grid of escape-iteration counts, one `u32` per pixel.
/// A cell holding `max_iterations` never escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeField {
    width: u32,
    height: u32,
    values: Vec<u32>,
}

impl EscapeField {
    /// Create a field with every cell set to `value`.
    pub fn filled(params: &FieldParams, value: u32) -> Self {
        Self {
            width: params.width,
            height: params.height,
            values: vec![value; params.pixel_count()],
        }
    }

    /// Build a field from a flat row-major buffer (`index = y * width + x`),
    /// as handed back by the SQL and GPU backends.
    pub fn from_raw(width: u32, height: u32, values: Vec<u32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(anyhow::anyhow!(
                "buffer length {} does not match {}x{} grid ({} cells)",
                values.len(),
                width,
                height,
                expected
            ));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.values[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: u32) {
        self.values[(y * self.width + x) as usize] = value;
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [u32] {
        &mut self.values
    }

    /// Convert to ndarray for interoperability, shape `(height, width)`.
    pub fn to_ndarray(&self) -> Array2<u32> {
        Array2::from_shape_vec(
            (self.height as usize, self.width as usize),
            self.values.clone(),
        )
        .expect("field buffer length matches its dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_validation() {
        assert!(FieldParams::new(2, 2, 1).is_ok());
        assert!(FieldParams::new(1, 100, 10).is_err());
        assert!(FieldParams::new(100, 1, 10).is_err());
        assert!(FieldParams::new(100, 100, 0).is_err());
    }

    #[test]
    fn test_pixel_to_plane_corners() {
        let params = FieldParams::new(1400, 800, 256).unwrap();
        assert_eq!(params.pixel_to_plane(0, 0), (-2.5, -1.0));
        assert_eq!(params.pixel_to_plane(1399, 799), (1.0, 1.0));
    }

    #[test]
    fn test_field_shape() {
        let params = FieldParams::new(17, 13, 50).unwrap();
        let field = EscapeField::filled(&params, 7);
        assert_eq!(field.width(), 17);
        assert_eq!(field.height(), 13);
        assert_eq!(field.values().len(), 17 * 13);
        assert_eq!(field.to_ndarray().dim(), (13, 17));
    }

    #[test]
    fn test_from_raw_rejects_bad_length() {
        assert!(EscapeField::from_raw(4, 4, vec![0; 15]).is_err());
        assert!(EscapeField::from_raw(4, 4, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_get_set_roundtrip() {
        let params = FieldParams::new(5, 3, 10).unwrap();
        let mut field = EscapeField::filled(&params, 0);
        field.set(4, 2, 9);
        assert_eq!(field.get(4, 2), 9);
        assert_eq!(field.get(0, 0), 0);
    }
}
