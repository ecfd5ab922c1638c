//! Native mirror of the reputation relation
//!
//! Computes the same values the circuit constrains, over plain integers.
//! Provers call [`evaluate`] before synthesis: an `Ok` breakdown is a
//! satisfying assignment and carries the proof bit the verifier expects,
//! an `Err` names the invariant that would leave the relation
//! unsatisfiable.

use crate::error::{validation, CircuitError, CircuitResult};
use crate::inputs::{AgentMetrics, ReputationStatement};
use crate::params::{DEFAULT_STEEPNESS, SCALE, SIGMOID_MIDPOINT, WEIGHT_COUNT};

/// Component scores and the final outcome for one assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReputationBreakdown {
    /// Task completion ratio, scaled to [0, 1000]
    pub task_completion: u64,
    /// Output accuracy ratio, scaled to [0, 1000]
    pub accuracy: u64,
    /// Uptime ratio, scaled to [0, 1000]
    pub uptime: u64,
    /// Weighted review average, in [0, 1000]
    pub review_score: u64,
    /// Clamped response-time score, in [0, 1000]
    pub response_score: u64,
    /// Weighted component sum before rescaling, in [0, 1_000_000]
    pub weighted_sum: u64,
    /// Final reputation, in [0, 1000]
    pub reputation: u64,
    /// Whether the reputation meets the public threshold
    pub proof_bit: bool,
}

/// Scaled integer ratio: `numerator * SCALE / denominator`.
///
/// The caller ensures `denominator > 0`.
pub fn scaled_ratio(numerator: u64, denominator: u64) -> u64 {
    (numerator as u128 * SCALE as u128 / denominator as u128) as u64
}

/// Clamped-linear response score.
///
/// `midpoint + steepness * (threshold - response_time)`, clamped to
/// [0, 1000]. Monotone non-increasing in the response time.
pub fn clamped_response_score(response_time: u64, response_threshold: u64, steepness: u64) -> u64 {
    let raw = SIGMOID_MIDPOINT as i128
        + steepness as i128 * (response_threshold as i128 - response_time as i128);
    raw.clamp(0, SCALE as i128) as u64
}

/// Evaluate the relation with the default response curve steepness.
pub fn evaluate(
    metrics: &AgentMetrics,
    statement: &ReputationStatement,
) -> CircuitResult<ReputationBreakdown> {
    evaluate_with_steepness(metrics, statement, DEFAULT_STEEPNESS)
}

/// Evaluate the relation natively.
///
/// Validates every circuit invariant first, then folds the component
/// scores exactly as the constraints do: integer division with truncation
/// at each of the three division sites.
pub fn evaluate_with_steepness(
    metrics: &AgentMetrics,
    statement: &ReputationStatement,
    steepness: u64,
) -> CircuitResult<ReputationBreakdown> {
    metrics.validate()?;
    statement.validate()?;
    validation::validate_steepness(steepness)?;

    let task_completion = scaled_ratio(metrics.tasks_completed, metrics.total_tasks_assigned);
    let accuracy = scaled_ratio(metrics.correct_outputs, metrics.total_outputs);
    let uptime = scaled_ratio(metrics.operational_time, metrics.total_time);

    let mut review_sum: u128 = 0;
    let mut weight_total: u128 = 0;
    for i in 0..metrics.num_reviews as usize {
        review_sum += metrics.review_scores[i] as u128 * metrics.review_weights[i] as u128;
        weight_total += metrics.review_weights[i] as u128;
    }
    if weight_total == 0 {
        return Err(CircuitError::ZeroReviewWeight);
    }
    let review_score = (review_sum / weight_total) as u64;

    let response_score =
        clamped_response_score(metrics.avg_response_time, metrics.response_threshold, steepness);

    let weights = statement.effective_weights();
    let components = [task_completion, accuracy, uptime, review_score, response_score];
    let mut weighted_sum: u128 = 0;
    for i in 0..WEIGHT_COUNT {
        weighted_sum += components[i] as u128 * weights[i] as u128;
    }
    let reputation = (weighted_sum / SCALE as u128) as u64;
    let proof_bit = reputation >= statement.reputation_threshold;

    tracing::debug!(
        "reputation breakdown: task_completion={} accuracy={} uptime={} review={} response={} weighted_sum={} reputation={} proof_bit={}",
        task_completion,
        accuracy,
        uptime,
        review_score,
        response_score,
        weighted_sum,
        reputation,
        proof_bit
    );

    Ok(ReputationBreakdown {
        task_completion,
        accuracy,
        uptime,
        review_score,
        response_score,
        weighted_sum: weighted_sum as u64,
        reputation,
        proof_bit,
    })
}
