//! Piecewise response-time score gadget
//!
//! A true sigmoid needs exponentials the field cannot express, so the
//! curve is a clamped line with the same shape where it matters:
//!
//! ```text
//! raw   = 500 + steepness * (threshold - response_time)
//! score = clamp(raw, 0, 1000)
//! ```
//!
//! `raw` can be negative, which a prime field would wrap to a huge
//! element. All arithmetic therefore runs behind the constant
//! [`SIGMOID_OFFSET`]: the offset image is strictly positive for every
//! width-checked input, the clamp points become `OFFSET` and
//! `OFFSET + 1000`, and two comparators decide which piece of the curve
//! applies. The output is the arithmetic blend of the three pieces, so no
//! extra witnesses beyond the comparator decompositions are needed.

use ark_ff::PrimeField;
use ark_r1cs_std::{fields::fp::FpVar, prelude::*};
use ark_relations::r1cs::SynthesisError;

use crate::params::{RESPONSE_BITS, SCALE, SIGMOID_BITS, SIGMOID_MIDPOINT, SIGMOID_OFFSET};

use super::{comparison, range_check};

/// Clamped-linear response score in `[0, SCALE]`.
///
/// Monotone non-increasing in `response_time`, equal to
/// [`SIGMOID_MIDPOINT`] when the response time meets the threshold
/// exactly. `steepness` must be in `(0, MAX_STEEPNESS]` for the offset
/// bound to hold; [`crate::native::evaluate_with_steepness`] checks that
/// before proving.
pub fn response_score<F: PrimeField>(
    response_time: &FpVar<F>,
    response_threshold: &FpVar<F>,
    steepness: u64,
) -> Result<FpVar<F>, SynthesisError> {
    range_check::enforce_bit_width(response_time, RESPONSE_BITS)?;
    range_check::enforce_bit_width(response_threshold, RESPONSE_BITS)?;

    // shifted = OFFSET + 500 + steepness * (threshold - response_time)
    // stays in (0, 2^SIGMOID_BITS) for width-checked inputs
    let steepness_var = FpVar::constant(F::from(steepness));
    let base = FpVar::constant(F::from(SIGMOID_OFFSET + SIGMOID_MIDPOINT));
    let shifted = base + &steepness_var * response_threshold - &steepness_var * response_time;

    let lower = FpVar::constant(F::from(SIGMOID_OFFSET));
    let upper = FpVar::constant(F::from(SIGMOID_OFFSET + SCALE));
    let below = comparison::is_less_than(&shifted, &lower, SIGMOID_BITS)?;
    let above = comparison::is_less_than(&upper, &shifted, SIGMOID_BITS)?;

    // the three pieces are mutually exclusive, so a linear blend selects
    // exactly one of 0, 1000 and the in-band value
    let below_fp = FpVar::from(below);
    let above_fp = FpVar::from(above);
    let in_band = FpVar::constant(F::one()) - &below_fp - &above_fp;

    let full = FpVar::constant(F::from(SCALE));
    let score = &above_fp * &full + &in_band * (&shifted - &lower);
    Ok(score)
}
