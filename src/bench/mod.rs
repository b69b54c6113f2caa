//! Benchmark variants: a small trait over the field strategies and the
//! registry the driver iterates.

pub mod runner;

use crate::field::{self, EscapeField, FieldParams};
use anyhow::Result;

/// One way of computing the escape-time field.
pub trait Strategy {
    /// Display name for the results table.
    fn name(&self) -> &'static str;
    /// File-name stem for the rendered image.
    fn slug(&self) -> &'static str;
    /// Whether the backing engine initialized successfully. Strategies
    /// with no external backend are always available.
    fn available(&self) -> bool {
        true
    }
    fn compute(&self, params: &FieldParams) -> Result<EscapeField>;
}

pub struct ScalarStrategy;

impl Strategy for ScalarStrategy {
    fn name(&self) -> &'static str {
        "Scalar"
    }
    fn slug(&self) -> &'static str {
        "scalar"
    }
    fn compute(&self, params: &FieldParams) -> Result<EscapeField> {
        Ok(field::scalar::compute(params))
    }
}

pub struct RayonStrategy;

impl Strategy for RayonStrategy {
    fn name(&self) -> &'static str {
        "Scalar (Rayon)"
    }
    fn slug(&self) -> &'static str {
        "scalar-rayon"
    }
    fn compute(&self, params: &FieldParams) -> Result<EscapeField> {
        Ok(field::scalar::compute_parallel(params))
    }
}

pub struct VectorizedStrategy;

impl Strategy for VectorizedStrategy {
    fn name(&self) -> &'static str {
        "Vectorized (Masked)"
    }
    fn slug(&self) -> &'static str {
        "vectorized"
    }
    fn compute(&self, params: &FieldParams) -> Result<EscapeField> {
        Ok(field::vectorized::compute(params))
    }
}

#[cfg(feature = "simd")]
pub struct SimdStrategy;

#[cfg(feature = "simd")]
impl Strategy for SimdStrategy {
    fn name(&self) -> &'static str {
        "SIMD (f64x4)"
    }
    fn slug(&self) -> &'static str {
        "simd"
    }
    fn compute(&self, params: &FieldParams) -> Result<EscapeField> {
        Ok(field::simd::compute(params))
    }
}

pub struct SqliteStrategy;

impl Strategy for SqliteStrategy {
    fn name(&self) -> &'static str {
        "SQLite (SQL)"
    }
    fn slug(&self) -> &'static str {
        "sqlite"
    }
    fn compute(&self, params: &FieldParams) -> Result<EscapeField> {
        crate::sql::sqlite::compute(params)
    }
}

#[cfg(feature = "duckdb")]
pub struct DuckDbStrategy;

#[cfg(feature = "duckdb")]
impl Strategy for DuckDbStrategy {
    fn name(&self) -> &'static str {
        "DuckDB (SQL)"
    }
    fn slug(&self) -> &'static str {
        "duckdb"
    }
    fn compute(&self, params: &FieldParams) -> Result<EscapeField> {
        crate::sql::duckdb::compute(params)
    }
}

#[cfg(feature = "gpu")]
pub struct GpuStrategy {
    engine: Option<crate::gpu::GpuFieldEngine>,
}

#[cfg(feature = "gpu")]
impl GpuStrategy {
    /// Attempt engine initialization once; an unusable backend leaves
    /// the strategy registered but unavailable.
    pub fn new() -> Self {
        let engine = match pollster::block_on(crate::gpu::GpuFieldEngine::new()) {
            Ok(engine) => Some(engine),
            Err(e) => {
                log::warn!("GPU backend unavailable: {e}");
                None
            }
        };
        Self { engine }
    }
}

#[cfg(feature = "gpu")]
impl Default for GpuStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "gpu")]
impl Strategy for GpuStrategy {
    fn name(&self) -> &'static str {
        "GPU (wgpu)"
    }
    fn slug(&self) -> &'static str {
        "gpu"
    }
    fn available(&self) -> bool {
        self.engine.is_some()
    }
    fn compute(&self, params: &FieldParams) -> Result<EscapeField> {
        let engine = self
            .engine
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("GPU engine not initialized"))?;
        pollster::block_on(engine.compute(params))
    }
}

/// All benchmark variants, in table order.
pub fn registry() -> Vec<Box<dyn Strategy>> {
    let mut strategies: Vec<Box<dyn Strategy>> = Vec::new();
    strategies.push(Box::new(VectorizedStrategy));
    #[cfg(feature = "simd")]
    strategies.push(Box::new(SimdStrategy));
    #[cfg(feature = "duckdb")]
    strategies.push(Box::new(DuckDbStrategy));
    strategies.push(Box::new(RayonStrategy));
    strategies.push(Box::new(ScalarStrategy));
    strategies.push(Box::new(SqliteStrategy));
    #[cfg(feature = "gpu")]
    strategies.push(Box::new(GpuStrategy::new()));
    strategies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_strategies_agree_through_the_trait() {
        let params = FieldParams::new(17, 13, 50).unwrap();
        let oracle = ScalarStrategy.compute(&params).unwrap();
        let mut candidates: Vec<Box<dyn Strategy>> =
            vec![Box::new(RayonStrategy), Box::new(VectorizedStrategy)];
        #[cfg(feature = "simd")]
        candidates.push(Box::new(SimdStrategy));
        for strategy in candidates {
            let field = strategy.compute(&params).unwrap();
            crate::field::verify::compare_fields(&oracle, &field)
                .unwrap_or_else(|e| panic!("{} diverged: {e}", strategy.name()));
        }
    }

    #[test]
    fn test_slugs_are_unique() {
        let strategies = registry();
        let mut slugs: Vec<_> = strategies.iter().map(|s| s.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), strategies.len());
    }
}
