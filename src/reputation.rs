//! ReputationProof Circuit - arkworks R1CS Implementation
//!
//! Proves: weighted_reputation >= threshold within the validity window
//! without revealing any raw agent metric
//!
//! # Interview Q&A
//!
//! Q: 왜 평판 점수를 ZK로 증명하는가?
//! A: 원시 지표(작업 수, 리뷰 점수, 응답 시간)는 에이전트의 영업 정보
//!    공개되는 것은 threshold 비교 결과 한 비트뿐
//!
//! Q: R1CS에서 나눗셈은 어떻게 처리하는가?
//! A: 몫과 나머지를 witness로 받아
//!    num * 1000 = q * den + r 와 r < den 을 제약으로 검증
//!
//! Q: 리뷰 개수가 가변인데 회로는 고정 크기 아닌가?
//! A: 10개 슬롯을 항상 배치하고 [i < num_reviews] 지시자로 마스킹
//!    비활성 슬롯은 합에 0으로만 기여
//!
//! # Circuit Constraints
//! 1. Range check: every metric pair in [0, 2^32) with num <= den
//! 2. Ratios: num * 1000 = q * den + r, r < den (task, accuracy, uptime)
//! 3. Review masking: capacity slots folded behind count indicators
//! 4. Response score: clamped-linear curve over an offset window
//! 5. Aggregation: component..weight products with weight sum pinned to 1000
//! 6. Window: current_timestamp <= verification_period (64-bit)
//! 7. Output: reputation_proof public input equals [reputation >= threshold]

use ark_ff::PrimeField;
use ark_r1cs_std::{alloc::AllocVar, eq::EqGadget, fields::fp::FpVar, prelude::*};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use ark_std::marker::PhantomData;

use crate::error::{CircuitError, CircuitResult};
use crate::gadgets;
use crate::inputs::{AgentMetrics, ReputationStatement};
use crate::native;
use crate::params::{
    DEFAULT_STEEPNESS, DEFAULT_WEIGHTS, METRIC_BITS, RATIO_BITS, REVIEW_CAPACITY, SCALE,
    TIME_BITS, WEIGHT_COUNT,
};

/// ReputationProof Circuit for arkworks
///
/// # Design Decision
///
/// reputation = sum(component_i * weight_i) / 1000
///
/// 예: 완료율 800, 정확도 950, 가동률 990, 리뷰 800, 응답 500
///     기본 가중치 → 가중합 845500 → 평판 845
///
/// ZK로 증명: "reputation >= threshold" (원시 지표 숨김)
///
/// The circuit comes in two shapes. The default shape bakes
/// [`DEFAULT_WEIGHTS`] in as constants; the public-weight shape allocates
/// the five weights as public inputs so the verifier picks the weighting.
/// The two shapes have different constraint systems and need separate
/// Groth16 setups.
#[derive(Clone)]
pub struct ReputationCircuit<F: PrimeField> {
    /// Private: completed task count
    pub tasks_completed: Option<F>,
    /// Private: assigned task count
    pub total_tasks_assigned: Option<F>,
    /// Private: correct output count
    pub correct_outputs: Option<F>,
    /// Private: total output count
    pub total_outputs: Option<F>,
    /// Private: operational time units
    pub operational_time: Option<F>,
    /// Private: total time units
    pub total_time: Option<F>,
    /// Private: review scores, capacity slots
    pub review_scores: [Option<F>; REVIEW_CAPACITY],
    /// Private: review weights, capacity slots
    pub review_weights: [Option<F>; REVIEW_CAPACITY],
    /// Private: number of active review slots
    pub num_reviews: Option<F>,
    /// Private: average response time
    pub avg_response_time: Option<F>,
    /// Private: target response time
    pub response_threshold: Option<F>,
    /// Public: minimum reputation to qualify
    pub reputation_threshold: Option<F>,
    /// Public: timestamp the proof is evaluated at
    pub current_timestamp: Option<F>,
    /// Public: last timestamp the proof is valid for
    pub verification_period: Option<F>,
    /// Public (public-weight shape only): component weights
    pub weights: Option<[F; WEIGHT_COUNT]>,
    /// Shape selector, fixed at setup time
    pub use_public_weights: bool,
    /// Response curve slope. Part of the constraint shape: setup and
    /// proving circuits must use the same value.
    pub steepness: u64,
    _marker: PhantomData<F>,
}

impl<F: PrimeField> ReputationCircuit<F> {
    /// Create a circuit in the fixed-weight shape.
    ///
    /// Runs the native evaluation first, so invalid metrics are rejected
    /// before any proving work starts.
    pub fn new(metrics: &AgentMetrics, statement: &ReputationStatement) -> CircuitResult<Self> {
        if statement.weights.is_some() {
            return Err(CircuitError::UnexpectedWeights);
        }
        native::evaluate(metrics, statement)?;
        Ok(Self::unchecked(metrics, statement, false))
    }

    /// Create a circuit in the public-weight shape.
    ///
    /// The statement must carry the weights; they become public inputs in
    /// the order `w0..w4` between `verification_period` and the proof bit.
    pub fn with_public_weights(
        metrics: &AgentMetrics,
        statement: &ReputationStatement,
    ) -> CircuitResult<Self> {
        if statement.weights.is_none() {
            return Err(CircuitError::MissingWeights);
        }
        native::evaluate(metrics, statement)?;
        Ok(Self::unchecked(metrics, statement, true))
    }

    /// Create an empty fixed-weight circuit for setup.
    pub fn empty() -> Self {
        Self {
            tasks_completed: None,
            total_tasks_assigned: None,
            correct_outputs: None,
            total_outputs: None,
            operational_time: None,
            total_time: None,
            review_scores: [None; REVIEW_CAPACITY],
            review_weights: [None; REVIEW_CAPACITY],
            num_reviews: None,
            avg_response_time: None,
            response_threshold: None,
            reputation_threshold: None,
            current_timestamp: None,
            verification_period: None,
            weights: None,
            use_public_weights: false,
            steepness: DEFAULT_STEEPNESS,
            _marker: PhantomData,
        }
    }

    /// Create an empty public-weight circuit for setup.
    pub fn empty_with_public_weights() -> Self {
        Self {
            use_public_weights: true,
            ..Self::empty()
        }
    }

    /// Build assignments without native validation. Kept crate-private so
    /// tests can hand the constraint system inputs that `validate` would
    /// refuse.
    pub(crate) fn unchecked(
        metrics: &AgentMetrics,
        statement: &ReputationStatement,
        public_weights: bool,
    ) -> Self {
        Self {
            tasks_completed: Some(F::from(metrics.tasks_completed)),
            total_tasks_assigned: Some(F::from(metrics.total_tasks_assigned)),
            correct_outputs: Some(F::from(metrics.correct_outputs)),
            total_outputs: Some(F::from(metrics.total_outputs)),
            operational_time: Some(F::from(metrics.operational_time)),
            total_time: Some(F::from(metrics.total_time)),
            review_scores: metrics.review_scores.map(|v| Some(F::from(v))),
            review_weights: metrics.review_weights.map(|v| Some(F::from(v))),
            num_reviews: Some(F::from(metrics.num_reviews)),
            avg_response_time: Some(F::from(metrics.avg_response_time)),
            response_threshold: Some(F::from(metrics.response_threshold)),
            reputation_threshold: Some(F::from(statement.reputation_threshold)),
            current_timestamp: Some(F::from(statement.current_timestamp)),
            verification_period: Some(F::from(statement.verification_period)),
            weights: public_weights.then(|| statement.effective_weights().map(|w| F::from(w))),
            use_public_weights: public_weights,
            steepness: DEFAULT_STEEPNESS,
            _marker: PhantomData,
        }
    }
}

/// Width-check a metric pair, enforce `numerator <= denominator` and
/// return the ratio at scale 1000.
fn metric_ratio<F: PrimeField>(
    cs: ConstraintSystemRef<F>,
    numerator: &FpVar<F>,
    denominator: &FpVar<F>,
) -> Result<FpVar<F>, SynthesisError> {
    gadgets::enforce_bit_width(numerator, METRIC_BITS)?;
    gadgets::enforce_bit_width(denominator, METRIC_BITS)?;
    gadgets::enforce_less_or_equal(numerator, denominator, METRIC_BITS)?;

    let division = gadgets::div_with_remainder(cs, numerator, denominator, SCALE, METRIC_BITS)?;
    // the quotient needs its own width bound before the division equation
    // means anything over the integers
    gadgets::enforce_in_range(&division.quotient, SCALE, RATIO_BITS)?;
    Ok(division.quotient)
}

impl<F: PrimeField> ConstraintSynthesizer<F> for ReputationCircuit<F> {
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        // ======== Allocate Private Inputs ========

        let tasks_completed = FpVar::new_witness(cs.clone(), || {
            self.tasks_completed.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let total_tasks_assigned = FpVar::new_witness(cs.clone(), || {
            self.total_tasks_assigned.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let correct_outputs = FpVar::new_witness(cs.clone(), || {
            self.correct_outputs.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let total_outputs = FpVar::new_witness(cs.clone(), || {
            self.total_outputs.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let operational_time = FpVar::new_witness(cs.clone(), || {
            self.operational_time.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let total_time = FpVar::new_witness(cs.clone(), || {
            self.total_time.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let mut review_scores = Vec::with_capacity(REVIEW_CAPACITY);
        for slot in &self.review_scores {
            review_scores.push(FpVar::new_witness(cs.clone(), || {
                slot.ok_or(SynthesisError::AssignmentMissing)
            })?);
        }

        let mut review_weights = Vec::with_capacity(REVIEW_CAPACITY);
        for slot in &self.review_weights {
            review_weights.push(FpVar::new_witness(cs.clone(), || {
                slot.ok_or(SynthesisError::AssignmentMissing)
            })?);
        }

        let num_reviews = FpVar::new_witness(cs.clone(), || {
            self.num_reviews.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let avg_response_time = FpVar::new_witness(cs.clone(), || {
            self.avg_response_time.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let response_threshold = FpVar::new_witness(cs.clone(), || {
            self.response_threshold.ok_or(SynthesisError::AssignmentMissing)
        })?;

        // ======== Allocate Public Inputs ========

        let reputation_threshold = FpVar::new_input(cs.clone(), || {
            self.reputation_threshold.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let current_timestamp = FpVar::new_input(cs.clone(), || {
            self.current_timestamp.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let verification_period = FpVar::new_input(cs.clone(), || {
            self.verification_period.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let weight_vars: Vec<FpVar<F>> = if self.use_public_weights {
            let mut vars = Vec::with_capacity(WEIGHT_COUNT);
            for i in 0..WEIGHT_COUNT {
                let weight = FpVar::new_input(cs.clone(), || {
                    self.weights
                        .map(|ws| ws[i])
                        .ok_or(SynthesisError::AssignmentMissing)
                })?;
                // verifier-chosen weights still have to respect the scale
                gadgets::enforce_in_range(&weight, SCALE, RATIO_BITS)?;
                vars.push(weight);
            }
            vars
        } else {
            DEFAULT_WEIGHTS
                .iter()
                .map(|&w| FpVar::constant(F::from(w)))
                .collect()
        };

        // ======== Metric Ratios ========

        let task_completion = metric_ratio(cs.clone(), &tasks_completed, &total_tasks_assigned)?;
        let accuracy = metric_ratio(cs.clone(), &correct_outputs, &total_outputs)?;
        let uptime = metric_ratio(cs.clone(), &operational_time, &total_time)?;

        // ======== Review Average ========

        let masked = gadgets::fold_reviews(&review_scores, &review_weights, &num_reviews)?;

        // weight_sum <= 10 * 1000 fits RATIO_BITS; a zero weight sum is
        // rejected by the division gadget
        let review_division = gadgets::div_with_remainder(
            cs.clone(),
            &masked.review_sum,
            &masked.weight_sum,
            1,
            RATIO_BITS,
        )?;
        gadgets::enforce_in_range(&review_division.quotient, SCALE, RATIO_BITS)?;
        let review_score = review_division.quotient;

        // ======== Response Time Score ========

        let response_score =
            gadgets::response_score(&avg_response_time, &response_threshold, self.steepness)?;

        // ======== Weighted Aggregation ========

        let components = [task_completion, accuracy, uptime, review_score, response_score];
        let weighted = gadgets::weighted_sum(&components, &weight_vars)?;

        // reputation = weighted / 1000, back on the component scale
        let scale_var = FpVar::constant(F::from(SCALE));
        let rescale = gadgets::div_with_remainder(cs.clone(), &weighted, &scale_var, 1, RATIO_BITS)?;
        gadgets::enforce_in_range(&rescale.quotient, SCALE, RATIO_BITS)?;
        let reputation = rescale.quotient;

        // ======== Validity Window ========

        gadgets::enforce_bit_width(&current_timestamp, TIME_BITS)?;
        gadgets::enforce_bit_width(&verification_period, TIME_BITS)?;
        gadgets::enforce_less_or_equal(&current_timestamp, &verification_period, TIME_BITS)?;

        // ======== Qualification Bit ========

        gadgets::enforce_in_range(&reputation_threshold, SCALE, RATIO_BITS)?;
        let qualified = gadgets::is_greater_or_equal(&reputation, &reputation_threshold, RATIO_BITS)?;
        let qualified_fp = FpVar::from(qualified);

        // the bit itself is public; a proof for an unqualified agent is
        // still a valid proof, it just carries a zero
        let reputation_proof = FpVar::new_input(cs.clone(), || qualified_fp.value())?;
        reputation_proof.enforce_equal(&qualified_fp)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_relations::r1cs::ConstraintSystem;

    fn sample_metrics() -> AgentMetrics {
        AgentMetrics {
            tasks_completed: 80,
            total_tasks_assigned: 100,
            correct_outputs: 95,
            total_outputs: 100,
            operational_time: 990,
            total_time: 1000,
            review_scores: [800, 900, 700, 0, 0, 0, 0, 0, 0, 0],
            review_weights: [400, 300, 300, 0, 0, 0, 0, 0, 0, 0],
            num_reviews: 3,
            avg_response_time: 300,
            response_threshold: 300,
        }
    }

    fn sample_statement(threshold: u64) -> ReputationStatement {
        ReputationStatement {
            reputation_threshold: threshold,
            current_timestamp: 1_700_000_000,
            verification_period: 1_700_100_000,
            weights: None,
        }
    }

    #[test]
    fn test_worked_example_satisfied() {
        // components 800/950/990/800/500 → weighted 845500 → reputation 845
        let circuit = ReputationCircuit::<Fr>::new(&sample_metrics(), &sample_statement(800))
            .unwrap();

        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_unqualified_still_satisfiable() {
        // 845 < 900 flips the proof bit to zero but the proof stays valid
        let metrics = sample_metrics();
        let statement = sample_statement(900);
        let breakdown = native::evaluate(&metrics, &statement).unwrap();
        assert!(!breakdown.proof_bit);

        let circuit = ReputationCircuit::<Fr>::new(&metrics, &statement).unwrap();
        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_public_weight_shape_satisfied() {
        let metrics = sample_metrics();
        let mut statement = sample_statement(800);
        statement.weights = Some([300, 300, 200, 100, 100]);

        let circuit = ReputationCircuit::<Fr>::with_public_weights(&metrics, &statement).unwrap();
        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_new_rejects_statement_weights() {
        let mut statement = sample_statement(800);
        statement.weights = Some(DEFAULT_WEIGHTS);

        let result = ReputationCircuit::<Fr>::new(&sample_metrics(), &statement);
        assert_eq!(result.err(), Some(CircuitError::UnexpectedWeights));
    }

    #[test]
    fn test_with_public_weights_requires_weights() {
        let result =
            ReputationCircuit::<Fr>::with_public_weights(&sample_metrics(), &sample_statement(800));
        assert_eq!(result.err(), Some(CircuitError::MissingWeights));
    }

    #[test]
    fn test_constraint_count() {
        let circuit = ReputationCircuit::<Fr>::new(&sample_metrics(), &sample_statement(800))
            .unwrap();

        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();

        println!("\n=== Reputation Circuit R1CS Statistics ===");
        println!("Constraints: {}", cs.num_constraints());
        println!("Witness variables: {}", cs.num_witness_variables());
        println!("Public inputs: {}", cs.num_instance_variables());
    }

    #[test]
    fn test_groth16_proof() {
        use ark_bn254::Bn254;
        use ark_groth16::Groth16;
        use ark_snark::SNARK;
        use ark_std::rand::thread_rng;

        let mut rng = thread_rng();

        let metrics = sample_metrics();
        let statement = sample_statement(800);
        let breakdown = native::evaluate(&metrics, &statement).unwrap();
        let circuit = ReputationCircuit::<Fr>::new(&metrics, &statement).unwrap();

        // Setup
        let (pk, vk) =
            Groth16::<Bn254>::circuit_specific_setup(ReputationCircuit::<Fr>::empty(), &mut rng)
                .unwrap();

        // Prove
        let proof = Groth16::<Bn254>::prove(&pk, circuit, &mut rng).unwrap();

        // Public inputs: [threshold, timestamp, period, proof_bit]
        let public_inputs = statement.public_inputs::<Fr>(breakdown.proof_bit);

        // Verify
        let valid = Groth16::<Bn254>::verify(&vk, &public_inputs, &proof).unwrap();
        assert!(valid, "Groth16 reputation proof should be valid");

        println!("\n=== Reputation Groth16 Proof Generated ===");
    }

    #[test]
    fn test_bls12_381_field() {
        // the circuit is generic over the field, pin that with a second curve
        use ark_bls12_381::Fr as BlsFr;

        let circuit = ReputationCircuit::<BlsFr>::new(&sample_metrics(), &sample_statement(800))
            .unwrap();

        let cs = ConstraintSystem::<BlsFr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }
}
