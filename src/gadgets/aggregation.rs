//! Weighted aggregation gadget
//!
//! Folds component scores with their weights and pins the weight vector to
//! the fixed-point unit. The sum-to-1000 constraint is what makes 1000 a
//! structural invariant instead of a convention: any vector off by even
//! one part leaves the relation unsatisfiable.

use ark_ff::PrimeField;
use ark_r1cs_std::{eq::EqGadget, fields::fp::FpVar, prelude::*};
use ark_relations::r1cs::SynthesisError;

use crate::params::SCALE;

/// Enforce `sum(weights) == SCALE` and return `sum(values[i] * weights[i])`.
///
/// Works for constant and allocated weight variables alike. Slices must
/// have equal length; call sites index their five components densely.
pub fn weighted_sum<F: PrimeField>(
    values: &[FpVar<F>],
    weights: &[FpVar<F>],
) -> Result<FpVar<F>, SynthesisError> {
    debug_assert_eq!(values.len(), weights.len());

    let mut weight_total = FpVar::<F>::zero();
    for weight in weights {
        weight_total += weight;
    }
    weight_total.enforce_equal(&FpVar::constant(F::from(SCALE)))?;

    let mut acc = FpVar::<F>::zero();
    for (value, weight) in values.iter().zip(weights) {
        acc += value * weight;
    }
    Ok(acc)
}
