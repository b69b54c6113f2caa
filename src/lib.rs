//! Benchmarks for computing the Mandelbrot escape-iteration field
//! across execution models: a sequential scalar loop, a rayon parallel
//! loop, a masked whole-grid array, SIMD lanes, a recursive SQL fixed
//! point, and a GPU compute kernel. Every strategy must reproduce the
//! scalar oracle's field exactly; the equivalence harness in
//! [`field::verify`] enforces it.

pub mod bench;
pub mod field;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod render;
pub mod sql;
