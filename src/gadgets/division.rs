//! Field-safe division gadget
//!
//! Finite fields have no integer division, so the quotient and remainder
//! are supplied as witness hints and bound by constraints:
//!
//! 1. `numerator * scale = quotient * denominator + remainder`
//! 2. `denominator != 0`
//! 3. `remainder < 2^den_bits` and `remainder < denominator`
//!
//! The remainder gets its own width check before the strict comparison:
//! without it, a remainder congruent to a small negative value would slip
//! through the comparator band and break the integer uniqueness of the
//! `(quotient, remainder)` pair.
//!
//! The quotient bound is the caller's obligation. Every call site range
//! checks the quotient against the interval it expects, which also closes
//! the `numerator * scale <= quotient_max * denominator` side of the
//! argument.

use ark_ff::PrimeField;
use ark_r1cs_std::{
    alloc::AllocVar, boolean::Boolean, eq::EqGadget, fields::fp::FpVar, prelude::*,
};
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};
use num_bigint::BigUint;

use super::{comparison, range_check};

/// Quotient and remainder witnesses produced by [`div_with_remainder`]
pub struct DivisionResult<F: PrimeField> {
    /// `floor(numerator * scale / denominator)`
    pub quotient: FpVar<F>,
    /// `numerator * scale mod denominator`, strictly below the denominator
    pub remainder: FpVar<F>,
}

/// Divide `numerator * scale` by `denominator` with an explicit remainder.
///
/// `den_bits` is the bit width the denominator is known to satisfy; the
/// remainder is checked against the same width. A zero denominator leaves
/// the constraints unsatisfiable; the witness hints fall back to zero in
/// that case so synthesis itself never fails.
pub fn div_with_remainder<F: PrimeField>(
    cs: ConstraintSystemRef<F>,
    numerator: &FpVar<F>,
    denominator: &FpVar<F>,
    scale: u64,
    den_bits: usize,
) -> Result<DivisionResult<F>, SynthesisError> {
    let quotient = FpVar::new_witness(cs.clone(), || {
        let num: BigUint = numerator.value()?.into();
        let den: BigUint = denominator.value()?.into();
        if den == BigUint::from(0u64) {
            return Ok(F::zero());
        }
        Ok(F::from(num * BigUint::from(scale) / den))
    })?;
    let remainder = FpVar::new_witness(cs.clone(), || {
        let num: BigUint = numerator.value()?.into();
        let den: BigUint = denominator.value()?.into();
        if den == BigUint::from(0u64) {
            return Ok(F::zero());
        }
        Ok(F::from(num * BigUint::from(scale) % den))
    })?;

    // denominator must be nonzero
    let den_is_zero = denominator.is_eq(&FpVar::constant(F::zero()))?;
    den_is_zero.enforce_equal(&Boolean::constant(false))?;

    // defining equation, unique over the integers once both sides are
    // bounded far below the field modulus
    let scale_var = FpVar::constant(F::from(scale));
    let lhs = numerator * &scale_var;
    let rhs = &quotient * denominator + &remainder;
    lhs.enforce_equal(&rhs)?;

    // remainder strictly below the denominator, own width checked first
    range_check::enforce_bit_width(&remainder, den_bits)?;
    comparison::enforce_less_than(&remainder, denominator, den_bits)?;

    Ok(DivisionResult {
        quotient,
        remainder,
    })
}
