//! Review masking sub-circuit
//!
//! The relation cannot iterate a variable-length list, so reviews live in
//! a fixed array of [`REVIEW_CAPACITY`] slots plus an explicit count. Each
//! slot gets the indicator `[i < num_reviews]` from the comparison gadget
//! (never from a native conditional, which would change the circuit shape
//! per witness) and contributes `indicator * score * weight` to the fold.
//!
//! Range checks apply to the masked values, not the raw slots: garbage in
//! a slot at or past the count is multiplied to zero before any bound sees
//! it, so it can never make an otherwise valid assignment unsatisfiable.
//!
//! A count of zero yields a zero weight sum, which the downstream division
//! rejects through its zero-denominator check.

use ark_ff::PrimeField;
use ark_r1cs_std::{fields::fp::FpVar, prelude::*};
use ark_relations::r1cs::SynthesisError;

use crate::params::{RATIO_BITS, REVIEW_CAPACITY, SCALE};

use super::{comparison, range_check};

/// Masked fold over the review slots
pub struct MaskedReviews<F: PrimeField> {
    /// `sum(indicator_i * score_i * weight_i)`
    pub review_sum: FpVar<F>,
    /// `sum(indicator_i * weight_i)`
    pub weight_sum: FpVar<F>,
}

/// Fold the review arrays behind `[i < num_reviews]` indicators.
///
/// Enforces `num_reviews <= REVIEW_CAPACITY` and bounds every masked
/// score and weight to `[0, SCALE]`.
pub fn fold_reviews<F: PrimeField>(
    scores: &[FpVar<F>],
    weights: &[FpVar<F>],
    num_reviews: &FpVar<F>,
) -> Result<MaskedReviews<F>, SynthesisError> {
    debug_assert_eq!(scores.len(), REVIEW_CAPACITY);
    debug_assert_eq!(weights.len(), REVIEW_CAPACITY);

    // count bounded by capacity; also the comparator precondition for
    // every index test below
    range_check::enforce_in_range(num_reviews, REVIEW_CAPACITY as u64, RATIO_BITS)?;

    let mut review_sum = FpVar::<F>::zero();
    let mut weight_sum = FpVar::<F>::zero();
    for (i, (score, weight)) in scores.iter().zip(weights).enumerate() {
        let index = FpVar::constant(F::from(i as u64));
        let active = comparison::is_less_than(&index, num_reviews, RATIO_BITS)?;
        let active_fp = FpVar::from(active);

        let masked_score = &active_fp * score;
        let masked_weight = &active_fp * weight;
        range_check::enforce_in_range(&masked_score, SCALE, RATIO_BITS)?;
        range_check::enforce_in_range(&masked_weight, SCALE, RATIO_BITS)?;

        review_sum += &masked_score * &masked_weight;
        weight_sum += masked_weight;
    }

    Ok(MaskedReviews {
        review_sum,
        weight_sum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_r1cs_std::alloc::AllocVar;
    use ark_relations::r1cs::{ConstraintSystem, ConstraintSystemRef};

    fn fold(
        scores: [u64; REVIEW_CAPACITY],
        weights: [u64; REVIEW_CAPACITY],
        num_reviews: u64,
    ) -> (ConstraintSystemRef<Fr>, MaskedReviews<Fr>) {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let score_vars: Vec<FpVar<Fr>> = scores
            .iter()
            .map(|&s| FpVar::new_witness(cs.clone(), || Ok(Fr::from(s))).unwrap())
            .collect();
        let weight_vars: Vec<FpVar<Fr>> = weights
            .iter()
            .map(|&w| FpVar::new_witness(cs.clone(), || Ok(Fr::from(w))).unwrap())
            .collect();
        let count = FpVar::new_witness(cs.clone(), || Ok(Fr::from(num_reviews))).unwrap();
        let folded = fold_reviews(&score_vars, &weight_vars, &count).unwrap();
        (cs, folded)
    }

    #[test]
    fn test_fold_active_prefix() {
        let (cs, folded) = fold(
            [800, 900, 700, 0, 0, 0, 0, 0, 0, 0],
            [400, 300, 300, 0, 0, 0, 0, 0, 0, 0],
            3,
        );
        // 800*400 + 900*300 + 700*300 = 800_000 over a weight sum of 1000
        assert_eq!(folded.review_sum.value().unwrap(), Fr::from(800_000u64));
        assert_eq!(folded.weight_sum.value().unwrap(), Fr::from(1000u64));
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_fold_ignores_garbage_past_count() {
        let mut scores = [800, 900, 700, 0, 0, 0, 0, 0, 0, 0];
        let mut weights = [400, 300, 300, 0, 0, 0, 0, 0, 0, 0];
        scores[5] = 999_999_999;
        weights[9] = u64::MAX;

        let (cs, folded) = fold(scores, weights, 3);
        assert_eq!(folded.review_sum.value().unwrap(), Fr::from(800_000u64));
        assert_eq!(folded.weight_sum.value().unwrap(), Fr::from(1000u64));
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_fold_rejects_active_garbage() {
        // the same garbage inside the active prefix must fail the masked
        // range checks
        let mut scores = [800, 900, 700, 0, 0, 0, 0, 0, 0, 0];
        scores[1] = 999_999_999;
        let (cs, _) = fold(scores, [400, 300, 300, 0, 0, 0, 0, 0, 0, 0], 3);
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_fold_full_capacity() {
        let (cs, folded) = fold([1000; 10], [100; 10], 10);
        assert_eq!(folded.review_sum.value().unwrap(), Fr::from(1_000_000u64));
        assert_eq!(folded.weight_sum.value().unwrap(), Fr::from(1000u64));
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_fold_zero_count_yields_zero_sums() {
        // the fold itself accepts an empty prefix; rejecting it is the
        // job of the division that consumes the weight sum
        let (cs, folded) = fold([500; 10], [100; 10], 0);
        assert_eq!(folded.review_sum.value().unwrap(), Fr::from(0u64));
        assert_eq!(folded.weight_sum.value().unwrap(), Fr::from(0u64));
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_fold_rejects_count_past_capacity() {
        let (cs, _) = fold([500; 10], [100; 10], 11);
        assert!(!cs.is_satisfied().unwrap());
    }
}
