//! Error types for the reputation circuit
//!
//! Every condition that would leave the relation unsatisfiable has a typed
//! counterpart here, so callers can reject bad inputs before spending prover
//! time on them. A reputation below the threshold is deliberately not an
//! error: that case produces a valid proof whose published bit is 0.

use thiserror::Error;

/// Error types for circuit input handling
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// Value exceeds the bit-width bound the circuit enforces
    #[error("{field} value {value} exceeds maximum {max}")]
    ValueOutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    /// Metric denominator is zero
    #[error("{field} must be positive")]
    ZeroDenominator { field: &'static str },

    /// Metric numerator exceeds its denominator
    #[error("{field}: numerator {numerator} exceeds denominator {denominator}")]
    RatioExceedsOne {
        field: &'static str,
        numerator: u64,
        denominator: u64,
    },

    /// No reviews supplied; the review average is undefined
    #[error("review count is zero, at least one review is required")]
    EmptyReviewSet,

    /// Review count exceeds the fixed slot capacity
    #[error("review count {count} exceeds capacity {capacity}")]
    TooManyReviews { count: u64, capacity: u64 },

    /// Active review weights sum to zero
    #[error("active review weights sum to zero")]
    ZeroReviewWeight,

    /// Weight vector does not sum to the fixed-point unit
    #[error("weights sum to {sum}, expected {expected}")]
    WeightSumMismatch { sum: u64, expected: u64 },

    /// Current timestamp lies past the verification period
    #[error("current timestamp {current} is past the verification period {period}")]
    WindowExpired { current: u64, period: u64 },

    /// Zero steepness flattens the response curve and ignores the metric
    #[error("response curve steepness must be positive")]
    ZeroSteepness,

    /// Public-weight circuit shape constructed without a weight vector
    #[error("circuit shape expects public weights but none were provided")]
    MissingWeights,

    /// Fixed-weight circuit shape constructed with an explicit weight vector
    #[error("public weights were provided but the circuit uses fixed weights")]
    UnexpectedWeights,
}

/// Result type for circuit input handling
pub type CircuitResult<T> = Result<T, CircuitError>;

/// Input validation utilities
///
/// These mirror the in-circuit hard assertions one to one. An input that
/// passes every check here yields a satisfiable assignment.
pub mod validation {
    use super::*;
    use crate::params::{
        MAX_METRIC_VALUE, MAX_RESPONSE_TIME, MAX_STEEPNESS, REVIEW_CAPACITY, SCALE, WEIGHT_COUNT,
    };

    /// Validate that a raw metric counter fits the metric bit width
    pub fn validate_metric_value(value: u64, field: &'static str) -> CircuitResult<()> {
        if value > MAX_METRIC_VALUE {
            return Err(CircuitError::ValueOutOfRange {
                field,
                value,
                max: MAX_METRIC_VALUE,
            });
        }
        Ok(())
    }

    /// Validate a metric pair: positive denominator, numerator not above it
    pub fn validate_metric_pair(
        numerator: u64,
        denominator: u64,
        field: &'static str,
    ) -> CircuitResult<()> {
        if denominator == 0 {
            return Err(CircuitError::ZeroDenominator { field });
        }
        if numerator > denominator {
            return Err(CircuitError::RatioExceedsOne {
                field,
                numerator,
                denominator,
            });
        }
        Ok(())
    }

    /// Validate a ratio-scale value (score or weight) against [0, SCALE]
    pub fn validate_score(value: u64, field: &'static str) -> CircuitResult<()> {
        if value > SCALE {
            return Err(CircuitError::ValueOutOfRange {
                field,
                value,
                max: SCALE,
            });
        }
        Ok(())
    }

    /// Validate the review count against [1, REVIEW_CAPACITY]
    pub fn validate_review_count(count: u64) -> CircuitResult<()> {
        if count == 0 {
            return Err(CircuitError::EmptyReviewSet);
        }
        if count > REVIEW_CAPACITY as u64 {
            return Err(CircuitError::TooManyReviews {
                count,
                capacity: REVIEW_CAPACITY as u64,
            });
        }
        Ok(())
    }

    /// Validate a response-time value against the response bit width
    pub fn validate_response_time(value: u64, field: &'static str) -> CircuitResult<()> {
        if value > MAX_RESPONSE_TIME {
            return Err(CircuitError::ValueOutOfRange {
                field,
                value,
                max: MAX_RESPONSE_TIME,
            });
        }
        Ok(())
    }

    /// Validate the response curve steepness against (0, MAX_STEEPNESS]
    pub fn validate_steepness(steepness: u64) -> CircuitResult<()> {
        if steepness == 0 {
            return Err(CircuitError::ZeroSteepness);
        }
        if steepness > MAX_STEEPNESS {
            return Err(CircuitError::ValueOutOfRange {
                field: "steepness",
                value: steepness,
                max: MAX_STEEPNESS,
            });
        }
        Ok(())
    }

    /// Validate a weight vector: each weight in [0, SCALE], sum exactly SCALE
    pub fn validate_weights(weights: &[u64; WEIGHT_COUNT]) -> CircuitResult<()> {
        for &weight in weights {
            validate_score(weight, "weights")?;
        }
        let sum: u64 = weights.iter().sum();
        if sum != SCALE {
            return Err(CircuitError::WeightSumMismatch {
                sum,
                expected: SCALE,
            });
        }
        Ok(())
    }

    /// Validate the verification window
    pub fn validate_window(current: u64, period: u64) -> CircuitResult<()> {
        if current > period {
            return Err(CircuitError::WindowExpired { current, period });
        }
        Ok(())
    }

    /// Validate the public reputation threshold against [0, SCALE]
    pub fn validate_threshold(value: u64) -> CircuitResult<()> {
        validate_score(value, "reputation_threshold")
    }
}
