//! Input schema for the reputation relation
//!
//! [`AgentMetrics`] carries the private witness data, [`ReputationStatement`]
//! the public instance data. Both validate against the same bounds the
//! circuit enforces, so a prover can reject an unsatisfiable assignment
//! before key material is ever touched.

use ark_ff::PrimeField;
use serde::{Deserialize, Serialize};

use crate::error::{validation, CircuitResult};
use crate::params::{DEFAULT_WEIGHTS, REVIEW_CAPACITY, WEIGHT_COUNT};

/// Private performance data of one agent
///
/// Metric pairs are raw counters, never pre-computed ratios: the circuit
/// derives each ratio itself so a prover cannot claim 95% accuracy over
/// zero outputs. Review slots are fixed at [`REVIEW_CAPACITY`]; only the
/// first `num_reviews` entries are read, the rest may hold anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMetrics {
    /// Tasks finished within their deadline
    pub tasks_completed: u64,
    /// Tasks handed to the agent
    pub total_tasks_assigned: u64,
    /// Outputs judged correct
    pub correct_outputs: u64,
    /// Outputs produced
    pub total_outputs: u64,
    /// Time spent operational
    pub operational_time: u64,
    /// Total elapsed time over the same span
    pub total_time: u64,
    /// Review scores, each in [0, 1000] for active slots
    pub review_scores: [u64; REVIEW_CAPACITY],
    /// Review weights, each in [0, 1000] for active slots
    pub review_weights: [u64; REVIEW_CAPACITY],
    /// Number of active review slots
    pub num_reviews: u64,
    /// Average response time, in milliseconds
    pub avg_response_time: u64,
    /// Response time scoring the midpoint 500
    pub response_threshold: u64,
}

impl AgentMetrics {
    /// Check every bound the circuit will hard-assert.
    ///
    /// Inactive review slots are not inspected; the circuit masks them to
    /// zero before any range constraint sees them.
    pub fn validate(&self) -> CircuitResult<()> {
        let pairs = [
            (
                self.tasks_completed,
                self.total_tasks_assigned,
                "tasks_completed",
                "total_tasks_assigned",
            ),
            (
                self.correct_outputs,
                self.total_outputs,
                "correct_outputs",
                "total_outputs",
            ),
            (
                self.operational_time,
                self.total_time,
                "operational_time",
                "total_time",
            ),
        ];
        for (numerator, denominator, num_field, den_field) in pairs {
            validation::validate_metric_value(numerator, num_field)?;
            validation::validate_metric_value(denominator, den_field)?;
            validation::validate_metric_pair(numerator, denominator, den_field)?;
        }

        validation::validate_review_count(self.num_reviews)?;
        for i in 0..self.num_reviews as usize {
            validation::validate_score(self.review_scores[i], "review_scores")?;
            validation::validate_score(self.review_weights[i], "review_weights")?;
        }

        validation::validate_response_time(self.avg_response_time, "avg_response_time")?;
        validation::validate_response_time(self.response_threshold, "response_threshold")?;
        Ok(())
    }
}

/// Public statement a reputation proof is verified against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationStatement {
    /// Minimum reputation being claimed, in [0, 1000]
    pub reputation_threshold: u64,
    /// Timestamp the proof is generated at
    pub current_timestamp: u64,
    /// Last timestamp the proof is valid for
    pub verification_period: u64,
    /// Public weight vector. `None` selects the fixed-weight circuit shape
    /// with [`DEFAULT_WEIGHTS`] baked into the constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<[u64; WEIGHT_COUNT]>,
}

impl ReputationStatement {
    /// Check threshold, window and (if present) the weight vector.
    pub fn validate(&self) -> CircuitResult<()> {
        validation::validate_threshold(self.reputation_threshold)?;
        validation::validate_window(self.current_timestamp, self.verification_period)?;
        if let Some(weights) = &self.weights {
            validation::validate_weights(weights)?;
        }
        Ok(())
    }

    /// The weights this statement scores with
    pub fn effective_weights(&self) -> [u64; WEIGHT_COUNT] {
        self.weights.unwrap_or(DEFAULT_WEIGHTS)
    }

    /// Assemble the Groth16 instance vector in circuit allocation order:
    /// threshold, current timestamp, verification period, the weight vector
    /// when public, then the proof bit.
    ///
    /// `proof_bit` is the expected public outcome, normally taken from
    /// [`crate::native::evaluate`].
    pub fn public_inputs<F: PrimeField>(&self, proof_bit: bool) -> Vec<F> {
        let mut inputs = vec![
            F::from(self.reputation_threshold),
            F::from(self.current_timestamp),
            F::from(self.verification_period),
        ];
        if let Some(weights) = &self.weights {
            inputs.extend(weights.iter().map(|&weight| F::from(weight)));
        }
        inputs.push(F::from(proof_bit as u64));
        inputs
    }
}
