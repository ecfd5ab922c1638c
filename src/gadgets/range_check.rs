//! Range check gadgets
//!
//! R1CS has no lookup tables, so every range check decomposes its value
//! into bits and constrains the high bits to zero. The closed-interval
//! variants layer the comparison gadget on top of the width check, which
//! doubles as the comparator's operand precondition.

use ark_ff::PrimeField;
use ark_r1cs_std::{boolean::Boolean, eq::EqGadget, fields::fp::FpVar, prelude::*, ToBitsGadget};
use ark_relations::r1cs::SynthesisError;

use super::comparison;

/// Enforce `value < 2^bits`.
///
/// Rejects wrapped negatives: a value of `p - k` has high bits set for any
/// small `k`, so it can never pass as `-k`.
pub fn enforce_bit_width<F: PrimeField>(
    value: &FpVar<F>,
    bits: usize,
) -> Result<(), SynthesisError> {
    let value_bits = value.to_bits_le()?;
    for bit in value_bits.iter().skip(bits) {
        bit.enforce_equal(&Boolean::constant(false))?;
    }
    Ok(())
}

/// Returns the boolean `[value <= max]`.
///
/// The bit-width bound `value < 2^bits` is always enforced; only the
/// interval bound is reported as a boolean. `max` must be below `2^bits`.
pub fn is_in_range<F: PrimeField>(
    value: &FpVar<F>,
    max: u64,
    bits: usize,
) -> Result<Boolean<F>, SynthesisError> {
    enforce_bit_width(value, bits)?;
    let max_var = FpVar::constant(F::from(max));
    comparison::is_greater_or_equal(&max_var, value, bits)
}

/// Enforce `value` in `[0, max]`.
pub fn enforce_in_range<F: PrimeField>(
    value: &FpVar<F>,
    max: u64,
    bits: usize,
) -> Result<(), SynthesisError> {
    is_in_range(value, max, bits)?.enforce_equal(&Boolean::constant(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_r1cs_std::alloc::AllocVar;
    use ark_relations::r1cs::{ConstraintSystem, ConstraintSystemRef};

    use crate::params::{RATIO_BITS, SCALE};

    fn alloc(value: Fr) -> (ConstraintSystemRef<Fr>, FpVar<Fr>) {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let var = FpVar::new_witness(cs.clone(), || Ok(value)).unwrap();
        (cs, var)
    }

    #[test]
    fn test_bit_width_accepts_boundary() {
        let (cs, var) = alloc(Fr::from(65535u64));
        enforce_bit_width(&var, 16).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_bit_width_rejects_overflow() {
        let (cs, var) = alloc(Fr::from(65536u64));
        enforce_bit_width(&var, 16).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_bit_width_rejects_wrapped_negative() {
        // p - 1 acts as -1 in the field; its decomposition is full of
        // high bits and must fail any narrow width check
        let (cs, var) = alloc(Fr::from(0u64) - Fr::from(1u64));
        enforce_bit_width(&var, 16).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_in_range_accepts_interval() {
        for value in [0u64, 1, 500, 999, 1000] {
            let (cs, var) = alloc(Fr::from(value));
            enforce_in_range(&var, SCALE, RATIO_BITS).unwrap();
            assert!(cs.is_satisfied().unwrap(), "value={}", value);
        }
    }

    #[test]
    fn test_in_range_rejects_just_above_max() {
        let (cs, var) = alloc(Fr::from(SCALE + 1));
        enforce_in_range(&var, SCALE, RATIO_BITS).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_in_range_rejects_wrapped_negative() {
        let (cs, var) = alloc(Fr::from(0u64) - Fr::from(5u64));
        enforce_in_range(&var, SCALE, RATIO_BITS).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_is_in_range_boolean() {
        let (cs, var) = alloc(Fr::from(400u64));
        let in_range = is_in_range(&var, SCALE, RATIO_BITS).unwrap();
        assert!(in_range.value().unwrap());
        assert!(cs.is_satisfied().unwrap());

        // above max: the boolean is false but the width check still holds
        let (cs, var) = alloc(Fr::from(1500u64));
        let in_range = is_in_range(&var, SCALE, RATIO_BITS).unwrap();
        assert!(!in_range.value().unwrap());
        assert!(cs.is_satisfied().unwrap());
    }
}
