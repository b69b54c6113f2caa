//! Equivalence harness. The field is integer-valued, so strategies are
//! compared cell-for-cell with no tolerance; the first mismatch is
//! reported with its pixel coordinate and both values.

use super::EscapeField;
use anyhow::Result;

pub fn compare_fields(oracle: &EscapeField, candidate: &EscapeField) -> Result<()> {
    if oracle.width() != candidate.width() || oracle.height() != candidate.height() {
        return Err(anyhow::anyhow!(
            "field shapes differ: {}x{} vs {}x{}",
            oracle.width(),
            oracle.height(),
            candidate.width(),
            candidate.height()
        ));
    }

    for (i, (a, b)) in oracle
        .values()
        .iter()
        .zip(candidate.values().iter())
        .enumerate()
    {
        if a != b {
            let x = i as u32 % oracle.width();
            let y = i as u32 / oracle.width();
            return Err(anyhow::anyhow!(
                "fields diverge at pixel ({}, {}): expected {}, got {}",
                x,
                y,
                a,
                b
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{scalar, FieldParams};

    #[test]
    fn test_identical_fields_pass() {
        let params = FieldParams::new(17, 13, 50).unwrap();
        let a = scalar::compute(&params);
        let b = a.clone();
        assert!(compare_fields(&a, &b).is_ok());
    }

    #[test]
    fn test_single_cell_divergence_is_reported() {
        let params = FieldParams::new(17, 13, 50).unwrap();
        let a = scalar::compute(&params);
        let mut b = a.clone();
        b.set(6, 2, a.get(6, 2) + 1);
        let err = compare_fields(&a, &b).unwrap_err();
        assert!(err.to_string().contains("(6, 2)"));
    }

    #[test]
    fn test_shape_mismatch_is_reported() {
        let a = scalar::compute(&FieldParams::new(4, 4, 10).unwrap());
        let b = scalar::compute(&FieldParams::new(4, 5, 10).unwrap());
        assert!(compare_fields(&a, &b).is_err());
    }
}
