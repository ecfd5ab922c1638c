//! Comparison gadgets over bit decompositions
//!
//! Proves orderings between field values by decomposing a shifted
//! difference.
//!
//! # Strategy
//! 1. Compute `shifted = a + 2^bits - b` (in the field)
//! 2. Decompose `shifted` and constrain every bit above `bits + 1` to zero
//! 3. Bit `bits` of the decomposition is then exactly `[a >= b]`
//!
//! # Important Constraint
//! Both `a` and `b` MUST be in range [0, 2^bits) for this to work
//! correctly. Callers range-check free witnesses before comparing them;
//! derived values may rely on bounds that follow from checks on their
//! inputs.

use ark_ff::PrimeField;
use ark_r1cs_std::{boolean::Boolean, eq::EqGadget, fields::fp::FpVar, prelude::*, ToBitsGadget};
use ark_relations::r1cs::SynthesisError;

/// Returns the boolean `[a >= b]`.
///
/// Costs one bit decomposition of the shifted difference.
pub fn is_greater_or_equal<F: PrimeField>(
    a: &FpVar<F>,
    b: &FpVar<F>,
    bits: usize,
) -> Result<Boolean<F>, SynthesisError> {
    // shifted = a + 2^bits - b is in [1, 2^(bits+1) - 1] for in-range
    // operands, so it never wraps and bit `bits` records the ordering
    let shift = FpVar::constant(F::from(1u128 << bits));
    let shifted = a + &shift - b;

    let shifted_bits = shifted.to_bits_le()?;
    for bit in shifted_bits.iter().skip(bits + 1) {
        bit.enforce_equal(&Boolean::constant(false))?;
    }

    Ok(shifted_bits[bits].clone())
}

/// Returns the boolean `[a < b]`.
pub fn is_less_than<F: PrimeField>(
    a: &FpVar<F>,
    b: &FpVar<F>,
    bits: usize,
) -> Result<Boolean<F>, SynthesisError> {
    Ok(is_greater_or_equal(a, b, bits)?.not())
}

/// Enforce `a <= b`.
pub fn enforce_less_or_equal<F: PrimeField>(
    a: &FpVar<F>,
    b: &FpVar<F>,
    bits: usize,
) -> Result<(), SynthesisError> {
    is_greater_or_equal(b, a, bits)?.enforce_equal(&Boolean::constant(true))
}

/// Enforce `a < b`.
pub fn enforce_less_than<F: PrimeField>(
    a: &FpVar<F>,
    b: &FpVar<F>,
    bits: usize,
) -> Result<(), SynthesisError> {
    is_less_than(a, b, bits)?.enforce_equal(&Boolean::constant(true))
}
